use regex::Regex;
use std::sync::LazyLock;

use super::{Checker, FieldErrors};
use crate::models::auth::{SignInDraft, SignInForm, SignUpDraft, SignUpForm};

/// E.164: a plus sign followed by 8 to 15 digits.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{7,14}$").expect("phone pattern"));

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 72;

pub fn validate_sign_up(form: &SignUpForm) -> Result<SignUpDraft, FieldErrors> {
    let mut check = Checker::new();

    let full_name = check.optional_text("full_name", "Full name", &form.full_name, 100);
    let full_name_ok = full_name.is_some() || form.full_name.trim().is_empty();

    let (email, phone) = identifiers(&mut check, &form.email, &form.phone);

    let password = form.password.as_str();
    let password_len = password.chars().count();
    if password.is_empty() {
        check.fail("password", "Password is required");
    } else if password_len < MIN_PASSWORD_LEN {
        check.fail(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    } else if password_len > MAX_PASSWORD_LEN {
        check.fail(
            "password",
            format!("Password must be at most {MAX_PASSWORD_LEN} characters"),
        );
    }

    if form.password != form.confirm_password {
        check.fail("confirm_password", "Passwords do not match");
    }

    check.finish(|| {
        full_name_ok.then_some(())?;
        Some(SignUpDraft {
            full_name,
            email: email?,
            phone: phone?,
            password: form.password.clone(),
        })
    })
}

pub fn validate_sign_in(form: &SignInForm) -> Result<SignInDraft, FieldErrors> {
    let mut check = Checker::new();

    let (email, phone) = identifiers(&mut check, &form.email, &form.phone);

    if form.password.is_empty() {
        check.fail("password", "Password is required");
    }

    check.finish(|| {
        Some(SignInDraft {
            email: email?,
            phone: phone?,
            password: form.password.clone(),
        })
    })
}

/// Email and phone are each optional, but one of them must be present
/// once separators are stripped from the phone.
fn identifiers(
    check: &mut Checker,
    raw_email: &str,
    raw_phone: &str,
) -> (Option<Option<String>>, Option<Option<String>>) {
    let phone = compact_phone(raw_phone);
    if raw_email.trim().is_empty() && phone.is_empty() {
        check.fail("email", "Please enter an email address or phone number");
        return (None, None);
    }
    let email = check.email("email", raw_email);
    let phone = check_phone(check, phone);
    (email, phone)
}

fn compact_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '.'))
        .collect()
}

fn check_phone(check: &mut Checker, compact: String) -> Option<Option<String>> {
    if compact.is_empty() {
        return Some(None);
    }
    if !PHONE.is_match(&compact) {
        check.fail(
            "phone",
            "Please enter a phone number in international format, e.g. +14155550123",
        );
        return None;
    }
    Some(Some(compact))
}
