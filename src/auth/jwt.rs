use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;
use super::jwks::JwksCache;

/// Supabase JWT claims. `sub` is the user's UUID in `auth.users`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: Option<usize>,
    pub iss: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Supabase role (e.g. "authenticated"), unrelated to marketplace roles.
    pub role: Option<String>,
    pub app_metadata: Option<AppMetadata>,
    pub user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppMetadata {
    pub provider: Option<String>,
}

/// Metadata set at sign-up or by an OAuth provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub picture: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|e| AuthError::InvalidToken(format!("bad sub claim: {e}")))
    }

    pub fn display_name(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.full_name.clone().or_else(|| m.name.clone()))
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.user_metadata
            .as_ref()
            .and_then(|m| m.avatar_url.clone().or_else(|| m.picture.clone()))
    }

    /// Prefer the top-level email, fall back to metadata.
    pub fn user_email(&self) -> Option<String> {
        self.email
            .clone()
            .filter(|e| !e.is_empty())
            .or_else(|| self.user_metadata.as_ref().and_then(|m| m.email.clone()))
    }

    pub fn user_phone(&self) -> Option<String> {
        self.phone.clone().filter(|p| !p.is_empty())
    }

    pub fn provider(&self) -> String {
        self.app_metadata
            .as_ref()
            .and_then(|m| m.provider.clone())
            .unwrap_or_else(|| "email".to_string())
    }
}

/// Validate a token signed with the project's legacy HS256 JWT secret.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| format!("{:?}", e.kind()))
}

/// How the service verifies bearer tokens.
#[derive(Clone)]
pub enum TokenVerifier {
    /// Asymmetric keys published by the project.
    Jwks(JwksCache),
    /// Shared HS256 secret.
    Secret(String),
}

impl TokenVerifier {
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match self {
            TokenVerifier::Jwks(cache) => cache.validate_token(token).await,
            TokenVerifier::Secret(secret) => {
                validate_token(token, secret).map_err(AuthError::InvalidToken)
            }
        }
    }
}
