//! Supabase response handling and configuration helpers.

use serde_json::json;
use uuid::Uuid;

use craftlink_backend::config::project_ref;
use craftlink_backend::supabase::{SupabaseClient, SupabaseError, parse_session, storage_path};

#[test]
fn test_parse_full_session() {
    let user_id = Uuid::new_v4();
    let session = parse_session(&json!({
        "access_token": "at",
        "refresh_token": "rt",
        "expires_in": 3600,
        "user": { "id": user_id.to_string() }
    }));

    assert_eq!(session.access_token.as_deref(), Some("at"));
    assert_eq!(session.refresh_token.as_deref(), Some("rt"));
    assert_eq!(session.expires_in, Some(3600));
    assert_eq!(session.user_id, Some(user_id));
    assert!(!session.confirmation_required);
}

#[test]
fn test_parse_pending_confirmation() {
    let user_id = Uuid::new_v4();
    let session = parse_session(&json!({ "id": user_id.to_string(), "email": "a@b.co" }));

    assert!(session.access_token.is_none());
    assert!(session.confirmation_required);
    assert_eq!(session.user_id, Some(user_id));
}

#[test]
fn test_storage_path_is_scoped_and_sanitized() {
    let user_id = Uuid::new_v4();

    let path = storage_path(user_id, "my logo (final).png");
    assert!(path.starts_with(&format!("{user_id}/")));
    assert!(path.ends_with("-my-logo--final-.png"));
    assert!(!path.contains(' '));

    let path = storage_path(user_id, "../..");
    assert!(path.ends_with("-file"));
    assert_eq!(path.matches('/').count(), 1);
}

#[test]
fn test_only_client_errors_reach_the_user() {
    let rejected = SupabaseError::Api {
        status: 400,
        message: "Invalid login credentials".to_string(),
    };
    assert_eq!(rejected.user_message(), Some("Invalid login credentials"));

    let outage = SupabaseError::Api {
        status: 503,
        message: "upstream unavailable".to_string(),
    };
    assert_eq!(outage.user_message(), None);
}

#[test]
fn test_public_url() {
    let client = SupabaseClient::new("https://abc.supabase.co/", "anon");
    assert_eq!(
        client.public_url("portfolio-files", "u/f.png"),
        "https://abc.supabase.co/storage/v1/object/public/portfolio-files/u/f.png"
    );
}

#[test]
fn test_project_ref() {
    assert_eq!(project_ref("https://abc123.supabase.co").unwrap(), "abc123");
    assert!(project_ref("http://abc123.supabase.co").is_err());
    assert!(project_ref("https://example.com").is_err());
}
