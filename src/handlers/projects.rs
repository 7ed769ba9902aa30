use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{load_project, require_role, verify_project_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::projects as project_db;
use crate::error::ApiError;
use crate::guard::{OperationGuard, keys};
use crate::models::projects::{ProjectForm, ProjectListQuery};
use crate::models::roles::Role;
use crate::validation::validate_project;

/// GET /api/projects — browse open projects (paginated, filterable).
pub async fn get_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = project_db::list_projects(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/projects/mine — projects the caller posted.
pub async fn get_my_projects(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let projects = project_db::get_projects_by_owner(db.get_ref(), user.id()).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// GET /api/projects/{id}
pub async fn get_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let project = load_project(db.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// POST /api/projects — post a project (client role required).
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    guard: web::Data<OperationGuard>,
    body: web::Json<ProjectForm>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = user.id();
    require_role(db.get_ref(), owner_id, Role::Client, "post a project").await?;

    let draft = validate_project(&body)?;

    let project = guard
        .run(
            keys::new_project(owner_id),
            project_db::insert_project(db.get_ref(), draft, owner_id),
        )
        .await??;

    tracing::info!(project_id = %project.id, %owner_id, "project posted");
    Ok(HttpResponse::Created().json(project))
}

/// PUT /api/projects/{id} — edit a project (owner only).
pub async fn update_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<ProjectForm>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    verify_project_owner(db.get_ref(), id, user.id()).await?;

    let draft = validate_project(&body)?;
    let updated = project_db::update_project(db.get_ref(), id, draft).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/projects/{id} — remove a project and its claims (owner only).
pub async fn delete_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    verify_project_owner(db.get_ref(), id, user.id()).await?;

    let result = project_db::delete_project(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Project {id} not found")));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Project {id} deleted"),
    })))
}
