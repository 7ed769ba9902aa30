//! Dashboard gate: the pure state machine and its database-backed runner.
mod common;

use std::collections::BTreeSet;

use craftlink_backend::db::roles as role_db;
use craftlink_backend::gate::runner;
use craftlink_backend::gate::{DashboardState, Effect, GateError, GateEvent, GateView};
use craftlink_backend::models::roles::{Role, RoleSet};

fn roles(list: &[Role]) -> RoleSet {
    list.iter().copied().collect::<BTreeSet<_>>()
}

// ── pure machine ──

#[test]
fn test_no_roles_goes_to_role_setup() {
    let t = DashboardState::enter()
        .apply(GateEvent::RolesLoaded(RoleSet::new()))
        .unwrap();
    assert_eq!(t.state, DashboardState::RoleSetup);
    assert_eq!(t.effect, None);
}

#[test]
fn test_held_roles_open_the_selection_dialog() {
    let t = DashboardState::Loading
        .apply(GateEvent::RolesLoaded(roles(&[Role::Creator])))
        .unwrap();
    assert_eq!(
        t.state,
        DashboardState::SelectionDialog {
            held: roles(&[Role::Creator])
        }
    );
}

#[test]
fn test_choosing_a_held_role_has_no_effect() {
    let t = DashboardState::SelectionDialog {
        held: roles(&[Role::Creator]),
    }
    .apply(GateEvent::Choose(Role::Creator))
    .unwrap();

    assert_eq!(t.effect, None);
    assert_eq!(
        t.state,
        DashboardState::DashboardActive {
            active: Role::Creator,
            held: roles(&[Role::Creator]),
        }
    );
}

#[test]
fn test_choosing_a_missing_role_requests_creation() {
    let dialog = DashboardState::SelectionDialog {
        held: roles(&[Role::Creator]),
    };
    let t = dialog.clone().apply(GateEvent::Choose(Role::Client)).unwrap();
    assert_eq!(t.effect, Some(Effect::CreateRole(Role::Client)));
    assert_eq!(t.state, dialog);

    let t = t.state.apply(GateEvent::RoleCreated(Role::Client)).unwrap();
    assert_eq!(
        t.state,
        DashboardState::DashboardActive {
            active: Role::Client,
            held: roles(&[Role::Client, Role::Creator]),
        }
    );
}

#[test]
fn test_failed_creation_leaves_state_unchanged() {
    let t = DashboardState::RoleSetup
        .apply(GateEvent::Choose(Role::Client))
        .unwrap();
    assert_eq!(t.effect, Some(Effect::CreateRole(Role::Client)));

    let t = t.state.apply(GateEvent::RoleCreationFailed).unwrap();
    assert_eq!(t.state, DashboardState::RoleSetup);
}

#[test]
fn test_switching_between_held_dashboards() {
    let both = roles(&[Role::Client, Role::Creator]);
    let t = DashboardState::DashboardActive {
        active: Role::Client,
        held: both.clone(),
    }
    .apply(GateEvent::Choose(Role::Creator))
    .unwrap();

    assert_eq!(t.effect, None);
    assert_eq!(t.state.active(), Some(Role::Creator));
    assert_eq!(t.state.held(), both);
}

#[test]
fn test_invalid_transitions() {
    let err = DashboardState::Loading
        .apply(GateEvent::Choose(Role::Client))
        .unwrap_err();
    assert_eq!(
        err,
        GateError::InvalidTransition {
            state: "loading",
            event: "choose",
        }
    );

    assert!(DashboardState::RoleSetup
        .apply(GateEvent::RolesLoaded(RoleSet::new()))
        .is_err());
    assert!(DashboardState::Loading
        .apply(GateEvent::RoleCreationFailed)
        .is_err());
}

#[test]
fn test_switcher_lists_both_roles() {
    let view = GateView::from(DashboardState::DashboardActive {
        active: Role::Creator,
        held: roles(&[Role::Creator]),
    });

    assert_eq!(view.switcher.len(), 2);
    let client = view.switcher.iter().find(|e| e.role == Role::Client).unwrap();
    assert!(!client.held && !client.active);
    let creator = view.switcher.iter().find(|e| e.role == Role::Creator).unwrap();
    assert!(creator.held && creator.active);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["state"], "dashboard_active");
    assert_eq!(json["active"], "creator");
    assert_eq!(json["held"], serde_json::json!(["creator"]));
}

// ── runner against storage ──

#[tokio::test]
async fn test_load_without_roles() {
    let db = common::test_db().await;
    let user = common::seed_user(&db, "newcomer").await;

    let state = runner::load(&db, user).await.unwrap();
    assert_eq!(state, DashboardState::RoleSetup);
}

#[tokio::test]
async fn test_choose_held_role_does_not_write() {
    let db = common::test_db().await;
    let user = common::seed_user_with_roles(&db, "maker", &[Role::Creator]).await;

    let state = runner::load(&db, user).await.unwrap();
    assert_eq!(
        state,
        DashboardState::SelectionDialog {
            held: roles(&[Role::Creator])
        }
    );

    let state = runner::choose(&db, user, Role::Creator).await.unwrap();
    assert_eq!(state.active(), Some(Role::Creator));
    assert_eq!(common::count_role_rows(&db, user).await, 1);
}

#[tokio::test]
async fn test_choose_missing_role_creates_it_once() {
    let db = common::test_db().await;
    let user = common::seed_user_with_roles(&db, "maker", &[Role::Creator]).await;

    let state = runner::choose(&db, user, Role::Client).await.unwrap();
    assert_eq!(
        state,
        DashboardState::DashboardActive {
            active: Role::Client,
            held: roles(&[Role::Client, Role::Creator]),
        }
    );

    // Choosing again is a plain switch.
    let state = runner::choose(&db, user, Role::Client).await.unwrap();
    assert_eq!(state.active(), Some(Role::Client));
    assert_eq!(common::count_role_rows(&db, user).await, 2);
}

#[tokio::test]
async fn test_first_role_from_setup() {
    let db = common::test_db().await;
    let user = common::seed_user(&db, "newcomer").await;

    let state = runner::choose(&db, user, Role::Creator).await.unwrap();
    assert_eq!(state.active(), Some(Role::Creator));
    assert_eq!(
        role_db::get_roles_for_user(&db, user).await.unwrap(),
        roles(&[Role::Creator])
    );
}
