use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::claims as claim_db;
use crate::db::projects as project_db;
use crate::db::roles as role_db;
use crate::error::ApiError;
use crate::models::claims;
use crate::models::projects;
use crate::models::roles::Role;

/// Fail with a blocking 403 unless the user holds `role`.
pub async fn require_role(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: Role,
    action: &str,
) -> Result<(), ApiError> {
    if role_db::has_role(db, user_id, role).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "You need the {} role to {action}",
            role.as_str()
        )))
    }
}

pub async fn load_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<projects::Model, ApiError> {
    project_db::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {project_id} not found")))
}

/// The project exists and was posted by `user_id`.
pub async fn verify_project_owner(
    db: &DatabaseConnection,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<projects::Model, ApiError> {
    let project = load_project(db, project_id).await?;
    if project.owner_id != user_id {
        return Err(ApiError::Forbidden("You do not own this project".to_string()));
    }
    Ok(project)
}

pub async fn load_claim(db: &DatabaseConnection, claim_id: Uuid) -> Result<claims::Model, ApiError> {
    claim_db::get_claim_by_id(db, claim_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Claim {claim_id} not found")))
}
