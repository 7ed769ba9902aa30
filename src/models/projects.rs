use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{PaginationQuery, StringList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    #[sea_orm(string_value = "on_site")]
    OnSite,
    #[sea_orm(string_value = "remote")]
    Remote,
}

/// Budget is a categorical range, never a free number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Budget {
    #[sea_orm(string_value = "under_500")]
    #[serde(rename = "under_500")]
    Under500,
    #[sea_orm(string_value = "500_1000")]
    #[serde(rename = "500_1000")]
    From500To1000,
    #[sea_orm(string_value = "1000_5000")]
    #[serde(rename = "1000_5000")]
    From1000To5000,
    #[sea_orm(string_value = "5000_10000")]
    #[serde(rename = "5000_10000")]
    From5000To10000,
    #[sea_orm(string_value = "over_10000")]
    #[serde(rename = "over_10000")]
    Over10000,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Timeline {
    #[sea_orm(string_value = "less_than_1_week")]
    #[serde(rename = "less_than_1_week")]
    LessThanOneWeek,
    #[sea_orm(string_value = "1_2_weeks")]
    #[serde(rename = "1_2_weeks")]
    OneToTwoWeeks,
    #[sea_orm(string_value = "2_4_weeks")]
    #[serde(rename = "2_4_weeks")]
    TwoToFourWeeks,
    #[sea_orm(string_value = "1_3_months")]
    #[serde(rename = "1_3_months")]
    OneToThreeMonths,
    #[sea_orm(string_value = "over_3_months")]
    #[serde(rename = "over_3_months")]
    OverThreeMonths,
}

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub project_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: Option<String>,
    pub location_type: LocationType,
    pub budget: Budget,
    pub timeline: Timeline,
    #[sea_orm(column_type = "JsonBinary")]
    pub creator_types: StringList,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: StringList,
    pub contact_email: Option<String>,
    pub contact_linkedin: Option<String>,
    pub contact_instagram: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::claims::Entity")]
    Claims,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::claims::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Claims.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Raw project form as posted by the front end. Every field is a string;
/// list fields are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub project_name: String,
    pub description: String,
    pub location: String,
    pub location_type: String,
    pub budget: String,
    pub timeline: String,
    pub creator_types: String,
    pub tags: String,
    pub contact_email: String,
    pub contact_linkedin: String,
    pub contact_instagram: String,
}

/// A project that passed validation, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub project_name: String,
    pub description: String,
    pub location: Option<String>,
    pub location_type: LocationType,
    pub budget: Budget,
    pub timeline: Timeline,
    pub creator_types: Vec<String>,
    pub tags: Vec<String>,
    pub contact_email: Option<String>,
    pub contact_linkedin: Option<String>,
    pub contact_instagram: Option<String>,
}

/// Browse filters. `page`/`limit` stay flat fields because query strings
/// cannot feed numbers through `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub location_type: Option<LocationType>,
    pub budget: Option<Budget>,
    pub tag: Option<String>,
}

impl ProjectListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}
