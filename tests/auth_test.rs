//! JWT validation with the project's HS256 secret.
//!
//! Tokens are minted locally and checked through `validate_token`; no
//! running server or database is needed.
mod common;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use common::{TEST_SECRET, mint_test_token};
use craftlink_backend::auth::jwt::{AppMetadata, Claims, TokenVerifier, validate_token};

#[test]
fn test_valid_token_decodes_correctly() {
    let user_id = Uuid::new_v4();
    let token = mint_test_token(&user_id.to_string(), "alice@example.com", "Alice Smith");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.user_email().unwrap(), "alice@example.com");
    assert_eq!(claims.display_name().unwrap(), "Alice Smith");
    assert_eq!(
        claims.avatar_url().unwrap(),
        "https://example.com/avatar.png"
    );
    assert_eq!(claims.user_id().unwrap(), user_id);
    assert_eq!(claims.provider(), "email");
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now - 300, // well past the 60s default leeway
        iat: Some(now - 3600),
        iss: None,
        email: Some("expired@example.com".to_string()),
        phone: None,
        role: None,
        app_metadata: None,
        user_metadata: None,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = mint_test_token(&Uuid::new_v4().to_string(), "bob@example.com", "Bob Jones");

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_phone_only_claims() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        exp: now + 3600,
        iat: Some(now),
        iss: None,
        email: Some(String::new()),
        phone: Some("+14155550123".to_string()),
        role: None,
        app_metadata: Some(AppMetadata {
            provider: Some("phone".to_string()),
        }),
        user_metadata: None,
    };

    // Supabase sends an empty email for phone users.
    assert!(claims.user_email().is_none());
    assert_eq!(claims.user_phone().unwrap(), "+14155550123");
    assert_eq!(claims.provider(), "phone");
    assert!(claims.display_name().is_none());
    assert!(claims.avatar_url().is_none());
}

#[tokio::test]
async fn test_secret_verifier_accepts_and_rejects() {
    let user_id = Uuid::new_v4();
    let token = mint_test_token(&user_id.to_string(), "carol@example.com", "Carol");

    let verifier = TokenVerifier::Secret(TEST_SECRET.to_string());
    let claims = verifier.verify(&token).await.expect("Token should verify");
    assert_eq!(claims.user_id().unwrap(), user_id);

    let other = TokenVerifier::Secret("another-secret-entirely-xxxxxxxxxxxxxxxxx".to_string());
    assert!(other.verify(&token).await.is_err());
}
