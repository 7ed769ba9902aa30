use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use uuid::Uuid;

use crate::models::ratings::{self, RatingDraft};

/// Insert or update the rating a client gave a creator.
///
/// Runs as a single `INSERT ... ON CONFLICT (creator_id, client_id) DO
/// UPDATE`, so resubmitting always leaves exactly one row holding the
/// latest values.
pub async fn upsert_rating(
    db: &DatabaseConnection,
    creator_id: Uuid,
    client_id: Uuid,
    input: RatingDraft,
) -> Result<ratings::Model, DbErr> {
    let now = chrono::Utc::now();
    let rating = ratings::ActiveModel {
        id: Set(Uuid::new_v4()),
        creator_id: Set(creator_id),
        client_id: Set(client_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        created_at: Set(now),
        updated_at: Set(Some(now)),
    };

    ratings::Entity::insert(rating)
        .on_conflict(
            OnConflict::columns([ratings::Column::CreatorId, ratings::Column::ClientId])
                .update_columns([
                    ratings::Column::Rating,
                    ratings::Column::Comment,
                    ratings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    get_rating(db, creator_id, client_id)
        .await?
        .ok_or(DbErr::RecordNotFound("Rating not found after upsert".to_string()))
}

/// Fetch the rating for a (creator, client) pair.
pub async fn get_rating(
    db: &DatabaseConnection,
    creator_id: Uuid,
    client_id: Uuid,
) -> Result<Option<ratings::Model>, DbErr> {
    ratings::Entity::find()
        .filter(ratings::Column::CreatorId.eq(creator_id))
        .filter(ratings::Column::ClientId.eq(client_id))
        .one(db)
        .await
}

/// All ratings a creator has received, newest first.
pub async fn get_ratings_for_creator(
    db: &DatabaseConnection,
    creator_id: Uuid,
) -> Result<Vec<ratings::Model>, DbErr> {
    ratings::Entity::find()
        .filter(ratings::Column::CreatorId.eq(creator_id))
        .order_by_desc(ratings::Column::CreatedAt)
        .all(db)
        .await
}
