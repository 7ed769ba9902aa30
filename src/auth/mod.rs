pub mod authorization;
pub mod jwks;
pub mod jwt;
pub mod middleware;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token header has no key id")]
    MissingKeyId,
    #[error("signing key {0} not found")]
    UnknownKey(String),
    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(String),
}
