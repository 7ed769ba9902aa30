use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt::TokenVerifier;
use crate::db::users::find_or_create_from_auth;
use crate::models::users::{self, CreateUserFromAuth};

/// The caller's profile row plus the bearer token they presented (needed
/// to act on their behalf against Supabase Storage).
pub struct AuthenticatedUser {
    pub profile: users::Model,
    pub access_token: String,
}

impl AuthenticatedUser {
    pub fn id(&self) -> uuid::Uuid {
        self.profile.id
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Bearer token from the Authorization header.
            let bearer = BearerAuth::extract(&req).await.map_err(|_| {
                actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
            })?;
            let token = bearer.token().to_string();

            // 2. Verify it.
            let verifier = req.app_data::<web::Data<TokenVerifier>>().ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("Token verifier not configured")
            })?;

            let claims = verifier.verify(&token).await.map_err(|e| {
                tracing::debug!(error = %e, "rejected bearer token");
                actix_web::error::ErrorUnauthorized("Invalid or expired session")
            })?;

            let user_id = claims
                .user_id()
                .map_err(|_| actix_web::error::ErrorUnauthorized("Invalid or expired session"))?;

            // 3. Find or create the profile row.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("Database not configured")
                })?;

            let profile = find_or_create_from_auth(
                db.get_ref(),
                CreateUserFromAuth {
                    id: user_id,
                    email: claims.user_email(),
                    phone: claims.user_phone(),
                    display_name: claims.display_name(),
                    avatar_url: claims.avatar_url(),
                    auth_provider: claims.provider(),
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to load profile");
                actix_web::error::ErrorInternalServerError("Something went wrong. Please try again.")
            })?;

            Ok(AuthenticatedUser {
                profile,
                access_token: token,
            })
        })
    }
}
