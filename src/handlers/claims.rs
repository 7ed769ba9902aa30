use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{load_claim, load_project, require_role, verify_project_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::claims as claim_db;
use crate::db::is_unique_violation;
use crate::error::ApiError;
use crate::guard::{OperationGuard, keys};
use crate::models::claims::{ClaimForm, CreateClaim, UpdateClaimStatus};
use crate::models::roles::Role;
use crate::validation::validate_claim;

const ALREADY_CLAIMED: &str = "You have already claimed this project";

/// POST /api/projects/{id}/claims — a creator expresses interest.
///
/// The creator role is required, a client cannot claim their own project,
/// and each creator may claim a project once.
pub async fn create_claim(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    guard: web::Data<OperationGuard>,
    path: web::Path<Uuid>,
    body: web::Json<ClaimForm>,
) -> Result<HttpResponse, ApiError> {
    let creator_id = user.id();
    let project_id = path.into_inner();

    require_role(db.get_ref(), creator_id, Role::Creator, "claim a project").await?;
    let message = validate_claim(&body)?;

    let project = load_project(db.get_ref(), project_id).await?;
    if project.owner_id == creator_id {
        return Err(ApiError::BadRequest(
            "You cannot claim your own project".to_string(),
        ));
    }

    let claim = guard
        .run(keys::claim(project_id, creator_id), async {
            if claim_db::claim_exists(db.get_ref(), project_id, creator_id).await? {
                return Err(ApiError::Conflict(ALREADY_CLAIMED.to_string()));
            }
            let input = CreateClaim {
                project_id,
                creator_id,
                message,
            };
            claim_db::insert_claim(db.get_ref(), input)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        ApiError::Conflict(ALREADY_CLAIMED.to_string())
                    } else {
                        ApiError::from(e)
                    }
                })
        })
        .await??;

    tracing::info!(claim_id = %claim.id, %project_id, %creator_id, "project claimed");
    Ok(HttpResponse::Created().json(claim))
}

/// GET /api/projects/{id}/claims — claims on a project (owner only).
pub async fn get_project_claims(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    verify_project_owner(db.get_ref(), project_id, user.id()).await?;

    let claims = claim_db::get_claims_by_project(db.get_ref(), project_id).await?;
    Ok(HttpResponse::Ok().json(claims))
}

/// GET /api/claims/mine — claims the caller made as a creator.
pub async fn get_my_claims(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let claims = claim_db::get_claims_by_creator(db.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(claims))
}

/// PUT /api/claims/{id}/status — accept or reject (project owner only).
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateClaimStatus>,
) -> Result<HttpResponse, ApiError> {
    let claim = load_claim(db.get_ref(), path.into_inner()).await?;
    verify_project_owner(db.get_ref(), claim.project_id, user.id()).await?;

    let updated = claim_db::update_claim_status(db.get_ref(), claim.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/claims/{id} — withdraw a claim (the claiming creator only).
pub async fn withdraw_claim(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let claim = load_claim(db.get_ref(), path.into_inner()).await?;
    if claim.creator_id != user.id() {
        return Err(ApiError::Forbidden(
            "You can only withdraw your own claims".to_string(),
        ));
    }

    claim_db::delete_claim(db.get_ref(), claim.id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Claim {} withdrawn", claim.id),
    })))
}
