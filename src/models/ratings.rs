use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `ratings` table. One row per (creator, client).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub creator_id: Uuid,
    pub client_id: Uuid,
    pub rating: i16,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatorId",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RatingForm {
    pub rating: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDraft {
    pub rating: i16,
    pub comment: Option<String>,
}

/// Aggregate shown on a creator's profile and dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: u64,
}

impl RatingSummary {
    pub fn from_ratings(ratings: &[Model]) -> Self {
        let count = ratings.len() as u64;
        let average = if ratings.is_empty() {
            None
        } else {
            let total: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
            Some(total as f64 / count as f64)
        };
        Self { average, count }
    }
}
