pub mod auth;
pub mod claims;
pub mod portfolio;
pub mod projects;
pub mod ratings;
pub mod roles;
pub mod users;

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Deepest page a listing can be asked for.
pub const MAX_PAGE: u64 = 10_000;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

/// A list of short strings stored as a JSON array column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl StringList {
    pub fn contains(&self, item: &str) -> bool {
        self.0.iter().any(|i| i.eq_ignore_ascii_case(item))
    }
}

/// One page of results plus enough to render "empty" vs "more available".
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total: u64,
}
