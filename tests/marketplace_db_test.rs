//! Storage behaviour against a migrated in-memory SQLite database:
//! rating upserts, claim uniqueness, role idempotence, project browsing
//! and portfolio ownership.
mod common;

use craftlink_backend::db::{self, claims as claim_db, portfolio as portfolio_db};
use craftlink_backend::db::{projects as project_db, ratings as rating_db, roles as role_db};
use craftlink_backend::db::users as user_db;
use craftlink_backend::models::auth::ProfileDraft;
use craftlink_backend::models::claims::{CreateClaim, Status, UpdateClaimStatus};
use craftlink_backend::models::portfolio::PortfolioDraft;
use craftlink_backend::models::{MAX_PAGE, PaginationQuery};
use craftlink_backend::models::projects::{
    Budget, LocationType, ProjectDraft, ProjectListQuery, Timeline,
};
use craftlink_backend::models::ratings::{RatingDraft, RatingSummary};
use craftlink_backend::models::roles::Role;
use craftlink_backend::models::users::CreateUserFromAuth;
use uuid::Uuid;

fn project_draft(name: &str, tags: &[&str]) -> ProjectDraft {
    ProjectDraft {
        project_name: name.to_string(),
        description: "A project description that is long enough.".to_string(),
        location: None,
        location_type: LocationType::Remote,
        budget: Budget::From500To1000,
        timeline: Timeline::OneToTwoWeeks,
        creator_types: vec!["Designer".to_string()],
        tags: tags.iter().map(|t| t.to_string()).collect(),
        contact_email: Some("client@example.com".to_string()),
        contact_linkedin: None,
        contact_instagram: None,
    }
}

fn portfolio_draft(title: &str, is_published: bool) -> PortfolioDraft {
    PortfolioDraft {
        title: title.to_string(),
        bio: None,
        skills: vec!["Illustration".to_string()],
        categories: vec![],
        hourly_rate: Some(60.0),
        experience_years: Some(4),
        location: None,
        is_published,
        file_urls: vec![],
    }
}

fn list_query(tag: Option<&str>) -> ProjectListQuery {
    ProjectListQuery {
        tag: tag.map(str::to_string),
        ..Default::default()
    }
}

// ── ratings ──

#[tokio::test]
async fn test_rating_resubmission_keeps_one_row_with_latest_values() {
    let db = common::test_db().await;
    let creator = common::seed_user_with_roles(&db, "creator", &[Role::Creator]).await;
    let client = common::seed_user_with_roles(&db, "client", &[Role::Client]).await;

    let first = rating_db::upsert_rating(
        &db,
        creator,
        client,
        RatingDraft {
            rating: 4,
            comment: Some("Great".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(first.rating, 4);

    let second = rating_db::upsert_rating(
        &db,
        creator,
        client,
        RatingDraft {
            rating: 2,
            comment: None,
        },
    )
    .await
    .unwrap();

    let all = rating_db::get_ratings_for_creator(&db, creator).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].rating, 2);
    assert_eq!(all[0].comment, None);
    assert_eq!(second.id, first.id);
}

#[tokio::test]
async fn test_rating_summary() {
    let db = common::test_db().await;
    let creator = common::seed_user(&db, "creator").await;

    let empty = RatingSummary::from_ratings(&[]);
    assert_eq!(empty.count, 0);
    assert_eq!(empty.average, None);

    for score in [5, 4] {
        let client = common::seed_user(&db, "client").await;
        rating_db::upsert_rating(
            &db,
            creator,
            client,
            RatingDraft {
                rating: score,
                comment: None,
            },
        )
        .await
        .unwrap();
    }

    let ratings = rating_db::get_ratings_for_creator(&db, creator).await.unwrap();
    let summary = RatingSummary::from_ratings(&ratings);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average, Some(4.5));
}

// ── claims ──

#[tokio::test]
async fn test_duplicate_claim_hits_unique_index() {
    let db = common::test_db().await;
    let client = common::seed_user_with_roles(&db, "client", &[Role::Client]).await;
    let creator = common::seed_user_with_roles(&db, "creator", &[Role::Creator]).await;
    let project = project_db::insert_project(&db, project_draft("Logo", &[]), client)
        .await
        .unwrap();

    let claim = CreateClaim {
        project_id: project.id,
        creator_id: creator,
        message: Some("Happy to help".to_string()),
    };
    let created = claim_db::insert_claim(&db, claim.clone()).await.unwrap();
    assert_eq!(created.status, Status::Pending);
    assert!(claim_db::claim_exists(&db, project.id, creator).await.unwrap());

    let err = claim_db::insert_claim(&db, claim).await.unwrap_err();
    assert!(db::is_unique_violation(&err));
    assert_eq!(claim_db::get_claims_by_project(&db, project.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_claim_lifecycle() {
    let db = common::test_db().await;
    let client = common::seed_user(&db, "client").await;
    let creator = common::seed_user(&db, "creator").await;
    let project = project_db::insert_project(&db, project_draft("Mural", &[]), client)
        .await
        .unwrap();

    let claim = claim_db::insert_claim(
        &db,
        CreateClaim {
            project_id: project.id,
            creator_id: creator,
            message: None,
        },
    )
    .await
    .unwrap();

    let updated = claim_db::update_claim_status(
        &db,
        claim.id,
        UpdateClaimStatus {
            status: Status::Accepted,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, Status::Accepted);

    let received = claim_db::get_claims_for_projects(&db, vec![project.id]).await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(claim_db::get_claims_for_projects(&db, vec![]).await.unwrap().is_empty());
    assert_eq!(claim_db::get_claims_by_creator(&db, creator).await.unwrap().len(), 1);

    claim_db::delete_claim(&db, claim.id).await.unwrap();
    assert!(claim_db::get_claim_by_id(&db, claim.id).await.unwrap().is_none());
}

// ── roles ──

#[tokio::test]
async fn test_ensure_role_is_idempotent() {
    let db = common::test_db().await;
    let user = common::seed_user(&db, "someone").await;

    assert!(role_db::ensure_role(&db, user, Role::Client).await.unwrap());
    assert!(!role_db::ensure_role(&db, user, Role::Client).await.unwrap());
    assert!(role_db::ensure_role(&db, user, Role::Creator).await.unwrap());

    assert_eq!(common::count_role_rows(&db, user).await, 2);
    assert!(role_db::has_role(&db, user, Role::Creator).await.unwrap());
}

// ── users ──

#[tokio::test]
async fn test_find_or_create_from_auth() {
    let db = common::test_db().await;
    let id = Uuid::new_v4();
    let input = CreateUserFromAuth {
        id,
        email: None,
        phone: Some("+14155550123".to_string()),
        display_name: None,
        avatar_url: None,
        auth_provider: "phone".to_string(),
    };

    let created = user_db::find_or_create_from_auth(&db, input.clone()).await.unwrap();
    let again = user_db::find_or_create_from_auth(&db, input).await.unwrap();
    assert_eq!(created.id, again.id);
    assert_eq!(again.auth_provider, "phone");

    let updated = user_db::update_profile(
        &db,
        id,
        ProfileDraft {
            display_name: Some("Dana".to_string()),
            avatar_url: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("Dana"));
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_recreated_auth_user_with_same_email_gets_a_new_profile() {
    let db = common::test_db().await;
    let input = |id| CreateUserFromAuth {
        id,
        email: Some("returning@example.com".to_string()),
        phone: Some("+14155550123".to_string()),
        display_name: None,
        avatar_url: None,
        auth_provider: "email".to_string(),
    };

    let old_id = Uuid::new_v4();
    let new_id = Uuid::new_v4();
    let old = user_db::find_or_create_from_auth(&db, input(old_id)).await.unwrap();
    let new = user_db::find_or_create_from_auth(&db, input(new_id)).await.unwrap();

    assert_eq!(old.id, old_id);
    assert_eq!(new.id, new_id);
    assert_eq!(new.email, old.email);
    assert!(user_db::get_user_by_id(&db, old_id).await.unwrap().is_some());
}

// ── projects ──

#[tokio::test]
async fn test_project_browsing_filters() {
    let db = common::test_db().await;
    let client = common::seed_user(&db, "client").await;

    project_db::insert_project(&db, project_draft("Logo", &["branding"]), client)
        .await
        .unwrap();
    project_db::insert_project(&db, project_draft("Video", &["motion"]), client)
        .await
        .unwrap();
    let mut on_site = project_draft("Mural", &["Branding", "paint"]);
    on_site.location_type = LocationType::OnSite;
    on_site.location = Some("Porto".to_string());
    project_db::insert_project(&db, on_site, client).await.unwrap();

    let all = project_db::list_projects(&db, &list_query(None)).await.unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.page, 1);

    let branded = project_db::list_projects(&db, &list_query(Some("branding"))).await.unwrap();
    assert_eq!(branded.total, 2);

    let mut query = list_query(None);
    query.location_type = Some(LocationType::OnSite);
    let local = project_db::list_projects(&db, &query).await.unwrap();
    assert_eq!(local.total, 1);
    assert_eq!(local.items[0].project_name, "Mural");

    let mine = project_db::get_projects_by_owner(&db, client).await.unwrap();
    assert_eq!(mine.len(), 3);
}

#[tokio::test]
async fn test_project_update_and_delete() {
    let db = common::test_db().await;
    let client = common::seed_user(&db, "client").await;
    let project = project_db::insert_project(&db, project_draft("Logo", &[]), client)
        .await
        .unwrap();

    let updated = project_db::update_project(&db, project.id, project_draft("Logo v2", &["brand"]))
        .await
        .unwrap();
    assert_eq!(updated.project_name, "Logo v2");
    assert!(updated.tags.contains("BRAND"));
    assert!(updated.updated_at.is_some());

    project_db::delete_project(&db, project.id).await.unwrap();
    assert!(project_db::get_project_by_id(&db, project.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_huge_page_number_returns_an_empty_page() {
    let db = common::test_db().await;
    let client = common::seed_user(&db, "client").await;
    project_db::insert_project(&db, project_draft("Logo", &["logo"]), client)
        .await
        .unwrap();

    let mut query = list_query(Some("logo"));
    query.page = Some(u64::MAX);
    query.limit = Some(100);
    let tagged = project_db::list_projects(&db, &query).await.unwrap();
    assert_eq!(tagged.total, 1);
    assert_eq!(tagged.page, MAX_PAGE);
    assert!(tagged.items.is_empty());

    query.tag = None;
    let untagged = project_db::list_projects(&db, &query).await.unwrap();
    assert_eq!(untagged.total, 1);
    assert!(untagged.items.is_empty());

    let portfolios = portfolio_db::list_published(
        &db,
        &PaginationQuery {
            page: Some(u64::MAX),
            limit: Some(100),
        },
    )
    .await
    .unwrap();
    assert_eq!(portfolios.page, MAX_PAGE);
    assert!(portfolios.items.is_empty());
}

// ── portfolios ──

#[tokio::test]
async fn test_one_portfolio_per_user() {
    let db = common::test_db().await;
    let creator = common::seed_user(&db, "creator").await;

    portfolio_db::insert_portfolio(&db, creator, portfolio_draft("Illustrator", false))
        .await
        .unwrap();
    let err = portfolio_db::insert_portfolio(&db, creator, portfolio_draft("Second", true))
        .await
        .unwrap_err();
    assert!(db::is_unique_violation(&err));
}

#[tokio::test]
async fn test_only_published_portfolios_are_listed() {
    let db = common::test_db().await;
    let hidden = common::seed_user(&db, "hidden").await;
    let shown = common::seed_user(&db, "shown").await;

    portfolio_db::insert_portfolio(&db, hidden, portfolio_draft("Draft work", false))
        .await
        .unwrap();
    portfolio_db::insert_portfolio(&db, shown, portfolio_draft("Public work", true))
        .await
        .unwrap();

    let page = portfolio_db::list_published(&db, &Default::default()).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Public work");

    let updated = portfolio_db::update_portfolio(&db, hidden, portfolio_draft("Now public", true))
        .await
        .unwrap();
    assert!(updated.is_published);
    assert_eq!(updated.skills.0, vec!["Illustration"]);
    assert_eq!(updated.hourly_rate, Some(60.0));

    let page = portfolio_db::list_published(&db, &Default::default()).await.unwrap();
    assert_eq!(page.total, 2);
}
