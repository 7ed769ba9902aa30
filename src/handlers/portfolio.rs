use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::is_unique_violation;
use crate::db::portfolio as portfolio_db;
use crate::error::ApiError;
use crate::guard::{OperationGuard, keys};
use crate::models::PaginationQuery;
use crate::models::portfolio::PortfolioForm;
use crate::models::roles::Role;
use crate::validation::validate_portfolio;

const ALREADY_SET_UP: &str = "You already have a portfolio. Edit it instead";

/// GET /api/portfolios — browse published portfolios.
pub async fn get_portfolios(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = portfolio_db::list_published(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/portfolios/{id} — a published portfolio, or the caller's own.
///
/// Unpublished portfolios of other creators answer "not found".
pub async fn get_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match portfolio_db::get_portfolio_by_id(db.get_ref(), id).await? {
        Some(item) if item.is_published || item.user_id == user.id() => {
            Ok(HttpResponse::Ok().json(item))
        }
        _ => Err(ApiError::NotFound(format!("Portfolio {id} not found"))),
    }
}

/// POST /api/portfolios — first-time portfolio setup (creator role).
pub async fn setup_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    guard: web::Data<OperationGuard>,
    body: web::Json<PortfolioForm>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.id();
    require_role(db.get_ref(), user_id, Role::Creator, "set up a portfolio").await?;

    let draft = validate_portfolio(&body)?;

    let item = guard
        .run(keys::portfolio(user_id), async {
            if portfolio_db::get_portfolio_by_user(db.get_ref(), user_id)
                .await?
                .is_some()
            {
                return Err(ApiError::Conflict(ALREADY_SET_UP.to_string()));
            }
            portfolio_db::insert_portfolio(db.get_ref(), user_id, draft)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        ApiError::Conflict(ALREADY_SET_UP.to_string())
                    } else {
                        ApiError::from(e)
                    }
                })
        })
        .await??;

    tracing::info!(portfolio_id = %item.id, %user_id, "portfolio set up");
    Ok(HttpResponse::Created().json(item))
}

/// GET /api/portfolios/me — the caller's portfolio.
pub async fn get_my_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    portfolio_db::get_portfolio_by_user(db.get_ref(), user.id())
        .await?
        .map(|item| HttpResponse::Ok().json(item))
        .ok_or_else(|| ApiError::NotFound("You have not set up a portfolio yet".to_string()))
}

/// PUT /api/portfolios/me — edit the caller's portfolio.
pub async fn update_my_portfolio(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    guard: web::Data<OperationGuard>,
    body: web::Json<PortfolioForm>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.id();
    let draft = validate_portfolio(&body)?;

    let updated = guard
        .run(
            keys::portfolio(user_id),
            portfolio_db::update_portfolio(db.get_ref(), user_id, draft),
        )
        .await?
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(_) => {
                ApiError::NotFound("You have not set up a portfolio yet".to_string())
            }
            other => ApiError::from(other),
        })?;

    Ok(HttpResponse::Ok().json(updated))
}
