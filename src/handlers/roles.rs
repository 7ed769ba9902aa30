use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::roles as role_db;
use crate::error::ApiError;
use crate::guard::{OperationGuard, keys};
use crate::models::roles::{EnableRole, RolesResponse};

/// GET /api/roles — roles the caller holds.
pub async fn get_roles(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let roles = role_db::get_roles_for_user(db.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(RolesResponse::from(&roles)))
}

/// POST /api/roles — enable a role (e.g. add `client` to rate a creator).
///
/// Enabling a role the caller already holds is a no-op answered with 200.
pub async fn enable_role(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    guard: web::Data<OperationGuard>,
    body: web::Json<EnableRole>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.id();
    let role = body.role;

    let created = guard
        .run(keys::role(user_id, role), role_db::ensure_role(db.get_ref(), user_id, role))
        .await??;

    if created {
        tracing::info!(%user_id, role = role.as_str(), "role enabled");
    }

    let roles = role_db::get_roles_for_user(db.get_ref(), user_id).await?;
    let body = RolesResponse::from(&roles);
    Ok(if created {
        HttpResponse::Created().json(body)
    } else {
        HttpResponse::Ok().json(body)
    })
}
