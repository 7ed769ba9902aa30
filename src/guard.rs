use moka::future::Cache;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("operation {key} is already in progress")]
pub struct Busy {
    pub key: String,
}

/// Keyed in-flight registry: at most one running operation per key.
///
/// Keys expire after `ttl` so a handler that never finished (panic,
/// dropped connection) cannot block its key forever.
#[derive(Clone)]
pub struct OperationGuard {
    in_flight: Cache<String, ()>,
}

impl OperationGuard {
    pub fn new(ttl: Duration) -> Self {
        let in_flight = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(100_000)
            .build();
        Self { in_flight }
    }

    /// Run `operation` unless another operation holds `key`.
    pub async fn run<F, T>(&self, key: impl Into<String>, operation: F) -> Result<T, Busy>
    where
        F: Future<Output = T>,
    {
        let key = key.into();
        let entry = self.in_flight.entry(key.clone()).or_insert(()).await;
        if !entry.is_fresh() {
            tracing::debug!(%key, "rejected duplicate in-flight operation");
            return Err(Busy { key });
        }

        let output = operation.await;
        self.in_flight.invalidate(&key).await;
        Ok(output)
    }

    pub async fn is_busy(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }
}

/// Operation keys, one per logical write.
pub mod keys {
    use uuid::Uuid;

    use crate::models::roles::Role;

    pub fn rating(creator_id: Uuid, client_id: Uuid) -> String {
        format!("rating:{creator_id}:{client_id}")
    }

    pub fn claim(project_id: Uuid, creator_id: Uuid) -> String {
        format!("claim:{project_id}:{creator_id}")
    }

    pub fn role(user_id: Uuid, role: Role) -> String {
        format!("role:{user_id}:{}", role.as_str())
    }

    pub fn portfolio(user_id: Uuid) -> String {
        format!("portfolio:{user_id}")
    }

    pub fn new_project(owner_id: Uuid) -> String {
        format!("project:new:{owner_id}")
    }
}
