use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Sign-up / sign-in forms (validated locally, then sent to Supabase Auth) ──

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDraft {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignInForm {
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInDraft {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

// ── Settings ──

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub display_name: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Session returned by Supabase Auth. `access_token` is absent when the
/// project requires email/phone confirmation before the first sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub user_id: Option<Uuid>,
    pub confirmation_required: bool,
}
