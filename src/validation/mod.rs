//! Field validators run before any write reaches storage.
//!
//! Every validator takes a flat form where each field is a raw string and
//! returns either a normalized draft or the field errors in declaration
//! order. Only [`FieldErrors::first_message`] is shown to the user.

pub mod auth;
pub mod file;
pub mod portfolio;
pub mod project;
pub mod rating;

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use validator::{ValidateEmail, ValidateUrl};

pub use auth::{validate_sign_in, validate_sign_up};
pub use file::{FileDescriptor, FileRejection, check_file, partition_files};
pub use portfolio::validate_portfolio;
pub use project::validate_project;
pub use rating::{validate_claim, validate_profile, validate_rating};

/// A single failed rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    /// The raw input that failed, for numeric fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// All errors found in one pass, in field-declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    /// The message surfaced to the user: the first error encountered.
    pub fn first_message(&self) -> &str {
        self.first().map(|e| e.message.as_str()).unwrap_or("Invalid input")
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
            value: None,
        });
    }

    pub(crate) fn push_with_value(
        &mut self,
        field: &'static str,
        message: impl Into<String>,
        value: &str,
    ) {
        self.0.push(FieldError {
            field,
            message: message.into(),
            value: Some(value.to_string()),
        });
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first_message())
    }
}

impl std::error::Error for FieldErrors {}

/// Collects field errors while a form is checked top to bottom.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: FieldErrors,
}

impl Checker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(field, message);
    }

    /// Required text with a character-length window.
    pub(crate) fn required_text(
        &mut self,
        field: &'static str,
        label: &str,
        raw: &str,
        len: RangeInclusive<usize>,
    ) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            self.fail(field, format!("{label} is required"));
            return None;
        }
        self.length(field, label, value, len)
    }

    /// Optional text: blank becomes `None`, anything else must fit `max`.
    pub(crate) fn optional_text(
        &mut self,
        field: &'static str,
        label: &str,
        raw: &str,
        max: usize,
    ) -> Option<String> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        self.length(field, label, value, 0..=max)
    }

    fn length(
        &mut self,
        field: &'static str,
        label: &str,
        value: &str,
        len: RangeInclusive<usize>,
    ) -> Option<String> {
        let count = value.chars().count();
        if count < *len.start() {
            self.fail(
                field,
                format!("{label} must be at least {} characters", len.start()),
            );
            None
        } else if count > *len.end() {
            self.fail(
                field,
                format!("{label} must be at most {} characters", len.end()),
            );
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Comma-separated list: split, trim, drop empties, then check the item
    /// count and every item's length. Oversized lists are rejected whole.
    pub(crate) fn list(
        &mut self,
        field: &'static str,
        label: &str,
        raw: &str,
        max_items: usize,
        item_len: RangeInclusive<usize>,
    ) -> Option<Vec<String>> {
        let items = split_list(raw);
        if items.len() > max_items {
            self.fail(field, format!("You can add at most {max_items} {label}"));
            return None;
        }
        if let Some(bad) = items.iter().find(|i| !item_len.contains(&i.chars().count())) {
            let message = if *item_len.start() > 1 {
                format!(
                    "Each of your {label} must be between {} and {} characters (\"{bad}\")",
                    item_len.start(),
                    item_len.end()
                )
            } else {
                format!(
                    "Each of your {label} must be at most {} characters (\"{bad}\")",
                    item_len.end()
                )
            };
            self.fail(field, message);
            return None;
        }
        Some(items)
    }

    /// Optional number parsed from a string and checked against `range`.
    /// The outer `Option` is `None` on failure; the inner one on blank input.
    pub(crate) fn number<T>(
        &mut self,
        field: &'static str,
        label: &str,
        raw: &str,
        range: RangeInclusive<T>,
    ) -> Option<Option<T>>
    where
        T: FromStr + PartialOrd + fmt::Display,
    {
        let value = raw.trim();
        if value.is_empty() {
            return Some(None);
        }
        let Ok(parsed) = value.parse::<T>() else {
            self.errors
                .push_with_value(field, format!("{label} must be a number"), raw);
            return None;
        };
        if !range.contains(&parsed) {
            self.errors.push_with_value(
                field,
                format!(
                    "{label} must be between {} and {}",
                    range.start(),
                    range.end()
                ),
                raw,
            );
            return None;
        }
        Some(Some(parsed))
    }

    /// Optional e-mail address.
    pub(crate) fn email(&mut self, field: &'static str, raw: &str) -> Option<Option<String>> {
        let value = raw.trim().to_string();
        if value.is_empty() {
            return Some(None);
        }
        if !value.validate_email() {
            self.fail(field, "Please enter a valid email address");
            return None;
        }
        Some(Some(value))
    }

    /// Optional absolute http(s) URL.
    pub(crate) fn url(&mut self, field: &'static str, label: &str, raw: &str) -> Option<Option<String>> {
        let value = raw.trim().to_string();
        if value.is_empty() {
            return Some(None);
        }
        if !is_web_url(&value) {
            self.fail(field, format!("{label} must be a valid URL"));
            return None;
        }
        Some(Some(value))
    }

    /// Parse one of a fixed set of categorical values.
    pub(crate) fn choice<T>(
        &mut self,
        field: &'static str,
        label: &str,
        raw: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let value = raw.trim();
        if value.is_empty() {
            self.fail(field, format!("Please select a {}", label.to_lowercase()));
            return None;
        }
        let parsed = parse(value);
        if parsed.is_none() {
            self.fail(field, format!("Please select a valid {}", label.to_lowercase()));
        }
        parsed
    }

    /// Finish the pass. `build` may only return `None` for a field that
    /// already recorded an error.
    pub(crate) fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, FieldErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}

/// Split a comma-separated field into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn is_web_url(value: &str) -> bool {
    let value = value.to_string();
    value.validate_url() && (value.starts_with("https://") || value.starts_with("http://"))
}
