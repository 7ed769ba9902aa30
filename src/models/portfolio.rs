use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::StringList;

/// SeaORM entity for the `portfolios` table. Each creator owns at most one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "portfolios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub skills: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub categories: StringList,
    #[sea_orm(column_type = "Double", nullable)]
    pub hourly_rate: Option<f64>,
    pub experience_years: Option<i32>,
    pub location: Option<String>,
    pub is_published: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub file_urls: StringList,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Creator,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Raw portfolio form. Numbers arrive as strings; `skills` and
/// `categories` are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortfolioForm {
    pub title: String,
    pub bio: String,
    pub skills: String,
    pub categories: String,
    pub hourly_rate: String,
    pub experience_years: String,
    pub location: String,
    pub is_published: bool,
    pub file_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioDraft {
    pub title: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub categories: Vec<String>,
    pub hourly_rate: Option<f64>,
    pub experience_years: Option<i32>,
    pub location: Option<String>,
    pub is_published: bool,
    pub file_urls: Vec<String>,
}
