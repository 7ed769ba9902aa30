use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::portfolio as portfolio_db;
use crate::db::ratings as rating_db;
use crate::db::roles as role_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::guard::{OperationGuard, keys};
use crate::models::portfolio;
use crate::models::ratings::{RatingForm, RatingSummary};
use crate::models::roles::Role;
use crate::models::users::{self, PublicProfile};
use crate::validation::validate_rating;

#[derive(Debug, Serialize)]
struct CreatorProfile {
    creator: PublicProfile,
    portfolio: Option<portfolio::Model>,
    ratings: RatingSummary,
    /// The caller's own rating of this creator, if any.
    my_rating: Option<i16>,
}

async fn load_creator(db: &DatabaseConnection, id: Uuid) -> Result<users::Model, ApiError> {
    let not_found = || ApiError::NotFound(format!("Creator {id} not found"));
    let user = user_db::get_user_by_id(db, id).await?.ok_or_else(not_found)?;
    if !role_db::has_role(db, id, Role::Creator).await? {
        return Err(not_found());
    }
    Ok(user)
}

/// GET /api/creators/{id} — public creator profile.
pub async fn get_creator(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let creator = load_creator(db.get_ref(), id).await?;

    let portfolio = portfolio_db::get_portfolio_by_user(db.get_ref(), id)
        .await?
        .filter(|p| p.is_published || id == user.id());
    let ratings = rating_db::get_ratings_for_creator(db.get_ref(), id).await?;
    let my_rating = ratings
        .iter()
        .find(|r| r.client_id == user.id())
        .map(|r| r.rating);

    Ok(HttpResponse::Ok().json(CreatorProfile {
        creator: PublicProfile::from(creator),
        portfolio,
        ratings: RatingSummary::from_ratings(&ratings),
        my_rating,
    }))
}

/// GET /api/creators/{id}/ratings
pub async fn get_ratings(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    load_creator(db.get_ref(), id).await?;
    let ratings = rating_db::get_ratings_for_creator(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ratings))
}

/// POST /api/creators/{id}/ratings — rate a creator (client role).
///
/// A second submission from the same client replaces the first.
pub async fn rate_creator(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    guard: web::Data<OperationGuard>,
    path: web::Path<Uuid>,
    body: web::Json<RatingForm>,
) -> Result<HttpResponse, ApiError> {
    let creator_id = path.into_inner();
    let client_id = user.id();

    require_role(db.get_ref(), client_id, Role::Client, "rate a creator").await?;
    if creator_id == client_id {
        return Err(ApiError::BadRequest("You cannot rate yourself".to_string()));
    }
    load_creator(db.get_ref(), creator_id).await?;

    let draft = validate_rating(&body)?;

    let rating = guard
        .run(
            keys::rating(creator_id, client_id),
            rating_db::upsert_rating(db.get_ref(), creator_id, client_id, draft),
        )
        .await??;

    tracing::info!(%creator_id, %client_id, rating = rating.rating, "creator rated");
    Ok(HttpResponse::Ok().json(rating))
}
