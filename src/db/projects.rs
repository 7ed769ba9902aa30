use sea_orm::*;
use uuid::Uuid;

use crate::models::Page;
use crate::models::projects::{self, ProjectDraft, ProjectListQuery};

/// Insert a new project owned by `owner_id`.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: ProjectDraft,
    owner_id: Uuid,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        project_name: Set(input.project_name),
        description: Set(input.description),
        location: Set(input.location),
        location_type: Set(input.location_type),
        budget: Set(input.budget),
        timeline: Set(input.timeline),
        creator_types: Set(input.creator_types.into()),
        tags: Set(input.tags.into()),
        contact_email: Set(input.contact_email),
        contact_linkedin: Set(input.contact_linkedin),
        contact_instagram: Set(input.contact_instagram),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_project.insert(db).await
}

/// Browse projects, newest first. The tag filter runs in memory over the
/// filtered rows because tags live in a JSON column.
pub async fn list_projects(
    db: &DatabaseConnection,
    query: &ProjectListQuery,
) -> Result<Page<projects::Model>, DbErr> {
    let mut select = projects::Entity::find();

    if let Some(location_type) = query.location_type {
        select = select.filter(projects::Column::LocationType.eq(location_type));
    }
    if let Some(budget) = query.budget {
        select = select.filter(projects::Column::Budget.eq(budget));
    }

    let select = select
        .order_by_desc(projects::Column::CreatedAt)
        .order_by_desc(projects::Column::Id);

    let pagination = query.pagination();
    let (page, limit) = (pagination.page(), pagination.limit());

    match query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => {
            let paginator = select.paginate(db, limit);
            let total = paginator.num_items().await?;
            let items = paginator.fetch_page(page - 1).await?;
            Ok(Page { items, page, total })
        }
        Some(tag) => {
            let matching: Vec<projects::Model> = select
                .all(db)
                .await?
                .into_iter()
                .filter(|p| p.tags.contains(tag))
                .collect();
            let total = matching.len() as u64;
            let skip = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
            let items = matching
                .into_iter()
                .skip(skip)
                .take(limit as usize)
                .collect();
            Ok(Page { items, page, total })
        }
    }
}

/// Fetch a single project by ID.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(db).await
}

/// Fetch all projects posted by a client.
pub async fn get_projects_by_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::OwnerId.eq(owner_id))
        .order_by_desc(projects::Column::CreatedAt)
        .all(db)
        .await
}

/// Replace a project's editable fields with a validated draft.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: ProjectDraft,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();
    active.project_name = Set(input.project_name);
    active.description = Set(input.description);
    active.location = Set(input.location);
    active.location_type = Set(input.location_type);
    active.budget = Set(input.budget);
    active.timeline = Set(input.timeline);
    active.creator_types = Set(input.creator_types.into());
    active.tags = Set(input.tags.into());
    active.contact_email = Set(input.contact_email);
    active.contact_linkedin = Set(input.contact_linkedin);
    active.contact_instagram = Set(input.contact_instagram);
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a project by ID.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}
