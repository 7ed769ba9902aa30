use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The two mutually exclusive dashboard experiences a user can hold.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "creator")]
    Creator,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Client, Role::Creator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Creator => "creator",
        }
    }
}

/// Roles currently held by a user, in a stable order.
pub type RoleSet = BTreeSet<Role>;

/// SeaORM entity for the `user_roles` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: Role,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct EnableRole {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<Role>,
}

impl From<&RoleSet> for RolesResponse {
    fn from(set: &RoleSet) -> Self {
        Self {
            roles: set.iter().copied().collect(),
        }
    }
}
