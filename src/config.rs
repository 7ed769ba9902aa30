use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid SUPABASE_URL {0:?}, expected https://PROJECT.supabase.co")]
    SupabaseUrl(String),
}

/// Everything the service reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// When set, tokens are verified with this HS256 secret instead of JWKS.
    pub supabase_jwt_secret: Option<String>,
    pub storage_bucket: String,
    pub port: u16,
    pub operation_guard_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let supabase_url = required("SUPABASE_URL")?
            .trim_end_matches('/')
            .to_string();
        project_ref(&supabase_url)?;

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            supabase_url,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "portfolio-files".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            operation_guard_ttl: parse_duration_secs("OPERATION_GUARD_TTL_SECS", 30),
        })
    }
}

/// `https://PROJECT.supabase.co` -> `PROJECT`.
pub fn project_ref(supabase_url: &str) -> Result<&str, ConfigError> {
    supabase_url
        .strip_prefix("https://")
        .and_then(|s| s.strip_suffix(".supabase.co"))
        .filter(|s| !s.is_empty() && !s.contains('/'))
        .ok_or_else(|| ConfigError::SupabaseUrl(supabase_url.to_string()))
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
