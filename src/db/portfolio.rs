use sea_orm::*;
use uuid::Uuid;

use crate::models::portfolio::{self, PortfolioDraft};
use crate::models::{Page, PaginationQuery};

/// Create the user's portfolio (once, at setup).
pub async fn insert_portfolio(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: PortfolioDraft,
) -> Result<portfolio::Model, DbErr> {
    let new_portfolio = portfolio::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        title: Set(input.title),
        bio: Set(input.bio),
        skills: Set(input.skills.into()),
        categories: Set(input.categories.into()),
        hourly_rate: Set(input.hourly_rate),
        experience_years: Set(input.experience_years),
        location: Set(input.location),
        is_published: Set(input.is_published),
        file_urls: Set(input.file_urls.into()),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_portfolio.insert(db).await
}

/// Browse published portfolios, newest first.
pub async fn list_published(
    db: &DatabaseConnection,
    query: &PaginationQuery,
) -> Result<Page<portfolio::Model>, DbErr> {
    let paginator = portfolio::Entity::find()
        .filter(portfolio::Column::IsPublished.eq(true))
        .order_by_desc(portfolio::Column::CreatedAt)
        .paginate(db, query.limit());

    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(query.page() - 1).await?;

    Ok(Page {
        items,
        page: query.page(),
        total,
    })
}

/// Fetch a single portfolio by ID.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find_by_id(id).one(db).await
}

/// Fetch the portfolio owned by a creator, if they have set one up.
pub async fn get_portfolio_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .filter(portfolio::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Replace the editable fields of a user's portfolio.
pub async fn update_portfolio(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: PortfolioDraft,
) -> Result<portfolio::Model, DbErr> {
    let item = get_portfolio_by_user(db, user_id)
        .await?
        .ok_or(DbErr::RecordNotFound("Portfolio not found".to_string()))?;

    let mut active: portfolio::ActiveModel = item.into();
    active.title = Set(input.title);
    active.bio = Set(input.bio);
    active.skills = Set(input.skills.into());
    active.categories = Set(input.categories.into());
    active.hourly_rate = Set(input.hourly_rate);
    active.experience_years = Set(input.experience_years);
    active.location = Set(input.location);
    active.is_published = Set(input.is_published);
    active.file_urls = Set(input.file_urls.into());
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}
