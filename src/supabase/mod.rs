//! The one shared handle onto the hosted Supabase project (Auth + Storage).

use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::auth::{AuthSession, SignInDraft, SignUpDraft};

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("request to Supabase failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Supabase returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl SupabaseError {
    /// Rejections the user can act on (bad credentials, taken email, rate
    /// limit) as opposed to outages.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            SupabaseError::Api { status, message } if (400..500).contains(status) => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Create an auth user with email or phone.
    pub async fn sign_up(&self, draft: &SignUpDraft) -> Result<AuthSession, SupabaseError> {
        let mut body = identifier_body(draft.email.as_deref(), draft.phone.as_deref());
        body["password"] = json!(draft.password);
        body["data"] = json!({
            "full_name": draft.full_name,
            "phone": draft.phone,
        });

        let url = format!("{}/auth/v1/signup", self.base_url);
        let response = self.post_json(&url, &body).await?;
        Ok(parse_session(&response))
    }

    /// Exchange email/phone + password for a session.
    pub async fn sign_in(&self, draft: &SignInDraft) -> Result<AuthSession, SupabaseError> {
        let mut body = identifier_body(draft.email.as_deref(), draft.phone.as_deref());
        body["password"] = json!(draft.password);

        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let response = self.post_json(&url, &body).await?;
        Ok(parse_session(&response))
    }

    /// Upload bytes to `bucket/path` on behalf of the signed-in user and
    /// return the public URL.
    pub async fn upload_file(
        &self,
        access_token: &str,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, SupabaseError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);
        debug!("Uploading {} bytes to {url}", bytes.len());

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .header("apikey", &self.anon_key)
            .header("content-type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message: error_message(&body, status.as_str()),
            });
        }

        Ok(self.public_url(bucket, path))
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, SupabaseError> {
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message: error_message(&payload, status.as_str()),
            });
        }
        Ok(payload)
    }
}

/// Where a user's upload lands inside the bucket: `{user_id}/{uuid}-{name}`.
pub fn storage_path(user_id: Uuid, file_name: &str) -> String {
    let safe: String = file_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let safe = if safe.trim_matches(['-', '.']).is_empty() {
        "file".to_string()
    } else {
        safe
    };
    format!("{user_id}/{}-{safe}", Uuid::new_v4())
}

fn identifier_body(email: Option<&str>, phone: Option<&str>) -> Value {
    match (email, phone) {
        (Some(email), _) => json!({ "email": email }),
        (None, Some(phone)) => json!({ "phone": phone }),
        (None, None) => json!({}),
    }
}

/// Supabase answers sign-up with a full session when auto-confirm is on,
/// and with just the user object when confirmation is pending.
pub fn parse_session(body: &Value) -> AuthSession {
    let access_token = body["access_token"].as_str().map(str::to_string);
    let user_id = body["user"]["id"]
        .as_str()
        .or_else(|| body["id"].as_str())
        .and_then(|id| Uuid::parse_str(id).ok());

    AuthSession {
        confirmation_required: access_token.is_none(),
        access_token,
        refresh_token: body["refresh_token"].as_str().map(str::to_string),
        expires_in: body["expires_in"].as_u64(),
        user_id,
    }
}

fn error_message(body: &Value, fallback: &str) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|k| body[*k].as_str())
        .unwrap_or(fallback)
        .to_string()
}
