pub mod claims;
pub mod portfolio;
pub mod projects;
pub mod ratings;
pub mod roles;
pub mod users;

use sea_orm::{Database, DatabaseConnection, DbErr, SqlErr};

/// Create a SeaORM database connection pool.
pub async fn create_pool(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// True when the error is a unique-index violation (a duplicate write that
/// slipped past the read-then-write check).
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
