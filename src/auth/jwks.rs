use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::AuthError;
use super::jwt::Claims;

const JWKS_PATH: &str = "/auth/v1/.well-known/jwks.json";

/// One entry of the project's JSON Web Key Set (EC keys only).
#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    x: Option<String>,
    y: Option<String>,
    alg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Clone)]
struct VerifyingKey {
    key: DecodingKey,
    algorithm: Algorithm,
}

/// Signing keys fetched from the Supabase project, cached per `kid`.
#[derive(Clone)]
pub struct JwksCache {
    cache: Arc<Cache<String, VerifyingKey>>,
    jwks_url: String,
    client: reqwest::Client,
    anon_key: String,
}

impl JwksCache {
    pub fn new(supabase_url: &str, anon_key: &str) -> Self {
        let cache = Arc::new(
            Cache::builder()
                .time_to_live(Duration::from_secs(3600))
                .max_capacity(10)
                .build(),
        );

        Self {
            cache,
            jwks_url: format!("{}{JWKS_PATH}", supabase_url.trim_end_matches('/')),
            client: reqwest::Client::new(),
            anon_key: anon_key.to_string(),
        }
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .client
            .get(&self.jwks_url)
            .header("apikey", &self.anon_key)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::KeyFetch(format!("HTTP {status}")));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyFetch(format!("invalid JWKS document: {e}")))
    }

    async fn verifying_key(&self, kid: &str) -> Result<VerifyingKey, AuthError> {
        if let Some(cached) = self.cache.get(kid).await {
            return Ok(cached);
        }

        let jwk = self
            .fetch_keys()
            .await?
            .keys
            .into_iter()
            .find(|k| k.kid == kid)
            .ok_or_else(|| AuthError::UnknownKey(kid.to_string()))?;

        let (Some(x), Some(y)) = (jwk.x.as_deref(), jwk.y.as_deref()) else {
            return Err(AuthError::UnknownKey(kid.to_string()));
        };

        let algorithm = match jwk.alg.as_deref() {
            Some("ES384") => Algorithm::ES384,
            _ => Algorithm::ES256,
        };
        let key = DecodingKey::from_ec_components(x, y)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let verifying = VerifyingKey { key, algorithm };
        self.cache.insert(kid.to_string(), verifying.clone()).await;
        Ok(verifying)
    }

    pub async fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let VerifyingKey { key, algorithm } = self.verifying_key(&kid).await?;

        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(format!("{:?}", e.kind())))
    }
}
