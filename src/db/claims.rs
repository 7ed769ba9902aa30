use sea_orm::*;
use uuid::Uuid;

use crate::models::claims::{self, CreateClaim, Status, UpdateClaimStatus};

/// Insert a new claim (defaults to Pending status).
pub async fn insert_claim(
    db: &DatabaseConnection,
    input: CreateClaim,
) -> Result<claims::Model, DbErr> {
    let new_claim = claims::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(input.project_id),
        creator_id: Set(input.creator_id),
        status: Set(Status::Pending),
        message: Set(input.message),
        created_at: Set(chrono::Utc::now()),
    };

    new_claim.insert(db).await
}

/// Whether a creator has already claimed a project.
pub async fn claim_exists(
    db: &DatabaseConnection,
    project_id: Uuid,
    creator_id: Uuid,
) -> Result<bool, DbErr> {
    let count = claims::Entity::find()
        .filter(claims::Column::ProjectId.eq(project_id))
        .filter(claims::Column::CreatorId.eq(creator_id))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Fetch a single claim by ID.
pub async fn get_claim_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<claims::Model>, DbErr> {
    claims::Entity::find_by_id(id).one(db).await
}

/// Claims on one project, oldest first.
pub async fn get_claims_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
) -> Result<Vec<claims::Model>, DbErr> {
    claims::Entity::find()
        .filter(claims::Column::ProjectId.eq(project_id))
        .order_by_asc(claims::Column::CreatedAt)
        .all(db)
        .await
}

/// Claims on any of the given projects (the client dashboard).
pub async fn get_claims_for_projects(
    db: &DatabaseConnection,
    project_ids: Vec<Uuid>,
) -> Result<Vec<claims::Model>, DbErr> {
    if project_ids.is_empty() {
        return Ok(Vec::new());
    }

    claims::Entity::find()
        .filter(claims::Column::ProjectId.is_in(project_ids))
        .order_by_desc(claims::Column::CreatedAt)
        .all(db)
        .await
}

/// Claims a creator has made, newest first.
pub async fn get_claims_by_creator(
    db: &DatabaseConnection,
    creator_id: Uuid,
) -> Result<Vec<claims::Model>, DbErr> {
    claims::Entity::find()
        .filter(claims::Column::CreatorId.eq(creator_id))
        .order_by_desc(claims::Column::CreatedAt)
        .all(db)
        .await
}

/// Update the status of a claim.
pub async fn update_claim_status(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateClaimStatus,
) -> Result<claims::Model, DbErr> {
    let claim = claims::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Claim not found".to_string()))?;

    let mut active: claims::ActiveModel = claim.into();
    active.status = Set(input.status);

    active.update(db).await
}

/// Delete a claim by ID.
pub async fn delete_claim(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    claims::Entity::delete_by_id(id).exec(db).await
}
