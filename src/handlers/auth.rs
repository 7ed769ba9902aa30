use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::roles as role_db;
use crate::db::users;
use crate::error::ApiError;
use crate::models::auth::{ProfileForm, SignInForm, SignUpForm};
use crate::models::roles::Role;
use crate::models::users::UserResponse;
use crate::supabase::SupabaseClient;
use crate::validation::{validate_profile, validate_sign_in, validate_sign_up};

#[derive(Debug, Serialize)]
struct MeResponse {
    user: UserResponse,
    roles: Vec<Role>,
}

/// POST /api/auth/sign-up — validate locally, then create the auth user.
pub async fn sign_up(
    supabase: web::Data<SupabaseClient>,
    body: web::Json<SignUpForm>,
) -> Result<HttpResponse, ApiError> {
    let draft = validate_sign_up(&body)?;
    let session = supabase.sign_up(&draft).await?;
    tracing::info!(user_id = ?session.user_id, "user signed up");
    Ok(HttpResponse::Created().json(session))
}

/// POST /api/auth/sign-in — validate locally, then exchange for a session.
pub async fn sign_in(
    supabase: web::Data<SupabaseClient>,
    body: web::Json<SignInForm>,
) -> Result<HttpResponse, ApiError> {
    let draft = validate_sign_in(&body)?;
    let session = supabase.sign_in(&draft).await?;
    Ok(HttpResponse::Ok().json(session))
}

/// GET /api/auth/me — the caller's profile and the roles they hold.
pub async fn me(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let roles = role_db::get_roles_for_user(db.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(MeResponse {
        user: UserResponse::from(user.profile),
        roles: roles.into_iter().collect(),
    }))
}

/// PUT /api/auth/profile — settings screen.
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<ProfileForm>,
) -> Result<HttpResponse, ApiError> {
    let draft = validate_profile(&body)?;
    let updated = users::update_profile(db.get_ref(), user.id(), draft).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
