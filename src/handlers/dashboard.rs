use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::claims as claim_db;
use crate::db::portfolio as portfolio_db;
use crate::db::projects as project_db;
use crate::db::ratings as rating_db;
use crate::error::ApiError;
use crate::gate::{GateView, runner};
use crate::guard::{OperationGuard, keys};
use crate::models::ratings::RatingSummary;
use crate::models::roles::Role;
use crate::models::{claims, portfolio, projects};

#[derive(Debug, Deserialize)]
pub struct SelectDashboard {
    pub role: Role,
}

/// Data behind each of the two dashboards.
#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardData {
    Client {
        projects: Vec<projects::Model>,
        claims_received: Vec<claims::Model>,
    },
    Creator {
        portfolio: Option<portfolio::Model>,
        claims: Vec<claims::Model>,
        ratings: RatingSummary,
    },
}

/// GET /api/dashboard — resolve which screen to show: role setup, the
/// selection dialog, or (never here) an active dashboard.
pub async fn get_gate(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let state = runner::load(db.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(GateView::from(state)))
}

/// POST /api/dashboard/select — pick or switch dashboards, creating the
/// role on the fly when the caller does not hold it yet.
pub async fn select(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    guard: web::Data<OperationGuard>,
    body: web::Json<SelectDashboard>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.id();
    let role = body.role;

    let state = guard
        .run(keys::role(user_id, role), runner::choose(db.get_ref(), user_id, role))
        .await??;

    Ok(HttpResponse::Ok().json(GateView::from(state)))
}

/// GET /api/dashboard/{role} — contents of a dashboard the caller holds.
pub async fn get_dashboard(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Role>,
) -> Result<HttpResponse, ApiError> {
    let role = path.into_inner();
    let user_id = user.id();
    require_role(db.get_ref(), user_id, role, "open this dashboard").await?;

    let data = match role {
        Role::Client => {
            let projects = project_db::get_projects_by_owner(db.get_ref(), user_id).await?;
            let ids = projects.iter().map(|p| p.id).collect();
            let claims_received = claim_db::get_claims_for_projects(db.get_ref(), ids).await?;
            DashboardData::Client {
                projects,
                claims_received,
            }
        }
        Role::Creator => {
            let portfolio = portfolio_db::get_portfolio_by_user(db.get_ref(), user_id).await?;
            let claims = claim_db::get_claims_by_creator(db.get_ref(), user_id).await?;
            let ratings = rating_db::get_ratings_for_creator(db.get_ref(), user_id).await?;
            DashboardData::Creator {
                portfolio,
                claims,
                ratings: RatingSummary::from_ratings(&ratings),
            }
        }
    };

    Ok(HttpResponse::Ok().json(data))
}
