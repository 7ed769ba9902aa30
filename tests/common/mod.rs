#![allow(dead_code)]

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use craftlink_backend::auth::jwt::{Claims, UserMetadata};
use craftlink_backend::db::roles as role_db;
use craftlink_backend::models::roles::{self, Role};
use craftlink_backend::models::users;

/// Fake HS256 secret. Real project secrets never belong in tests.
pub const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

/// Fresh in-memory SQLite database with every migration applied.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory SQLite");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn seed_user(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    users::ActiveModel {
        id: Set(id),
        email: Set(Some(format!("{name}-{id}@example.com"))),
        phone: Set(None),
        display_name: Set(Some(name.to_string())),
        avatar_url: Set(None),
        auth_provider: Set("email".to_string()),
        created_at: Set(Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to seed user");
    id
}

pub async fn seed_user_with_roles(db: &DatabaseConnection, name: &str, roles: &[Role]) -> Uuid {
    let id = seed_user(db, name).await;
    for role in roles {
        role_db::ensure_role(db, id, *role)
            .await
            .expect("Failed to seed role");
    }
    id
}

/// Raw role rows for a user, duplicates included.
pub async fn count_role_rows(db: &DatabaseConnection, user_id: Uuid) -> u64 {
    roles::Entity::find()
        .filter(roles::Column::UserId.eq(user_id))
        .count(db)
        .await
        .expect("Failed to count roles")
}

/// Mint a JWT signed with HS256 using the test secret.
pub fn mint_test_token(sub: &str, email: &str, full_name: &str) -> String {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: sub.to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: Some("https://example.supabase.co/auth/v1".to_string()),
        email: Some(email.to_string()),
        phone: None,
        role: Some("authenticated".to_string()),
        app_metadata: None,
        user_metadata: Some(UserMetadata {
            full_name: Some(full_name.to_string()),
            name: None,
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            picture: None,
            email: Some(email.to_string()),
            email_verified: Some(true),
        }),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}
