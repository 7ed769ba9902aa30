use sea_orm::*;
use uuid::Uuid;

use crate::models::auth::ProfileDraft;
use crate::models::users::{self, CreateUserFromAuth};

/// Find the profile for a Supabase auth user, creating it from the JWT
/// claims on first sight (called by the auth extractor).
pub async fn find_or_create_from_auth(
    db: &DatabaseConnection,
    input: CreateUserFromAuth,
) -> Result<users::Model, DbErr> {
    if let Some(existing) = users::Entity::find_by_id(input.id).one(db).await? {
        return Ok(existing);
    }

    let new_user = users::ActiveModel {
        id: Set(input.id),
        email: Set(input.email),
        phone: Set(input.phone),
        display_name: Set(input.display_name),
        avatar_url: Set(input.avatar_url),
        auth_provider: Set(input.auth_provider),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    match new_user.insert(db).await {
        Ok(user) => Ok(user),
        // Two first requests from the same user raced; the other one won.
        Err(e) if super::is_unique_violation(&e) => users::Entity::find_by_id(input.id)
            .one(db)
            .await?
            .ok_or(e),
        Err(e) => Err(e),
    }
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Update display name / avatar from the settings screen.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: ProfileDraft,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(display_name) = input.display_name {
        active.display_name = Set(Some(display_name));
    }
    if let Some(avatar_url) = input.avatar_url {
        active.avatar_url = Set(Some(avatar_url));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
