use sea_orm::*;
use uuid::Uuid;

use crate::models::roles::{self, Role, RoleSet};

/// Fetch the set of roles a user holds.
pub async fn get_roles_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<RoleSet, DbErr> {
    let rows = roles::Entity::find()
        .filter(roles::Column::UserId.eq(user_id))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|r| r.role).collect())
}

pub async fn has_role(db: &DatabaseConnection, user_id: Uuid, role: Role) -> Result<bool, DbErr> {
    let count = roles::Entity::find()
        .filter(roles::Column::UserId.eq(user_id))
        .filter(roles::Column::Role.eq(role))
        .count(db)
        .await?;

    Ok(count > 0)
}

/// Give a user a role. Returns `false` when the user already held it.
pub async fn ensure_role(db: &DatabaseConnection, user_id: Uuid, role: Role) -> Result<bool, DbErr> {
    if has_role(db, user_id, role).await? {
        return Ok(false);
    }

    let new_role = roles::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        role: Set(role),
        created_at: Set(chrono::Utc::now()),
    };

    match new_role.insert(db).await {
        Ok(_) => Ok(true),
        // Lost a race with a concurrent insert of the same role.
        Err(e) if super::is_unique_violation(&e) => Ok(false),
        Err(e) => Err(e),
    }
}
