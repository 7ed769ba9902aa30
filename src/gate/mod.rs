//! Dashboard selection as an explicit state machine.
//!
//! `Loading → RoleSetup | SelectionDialog → DashboardActive`. The machine
//! is pure; [`runner`] drives it against the role table.

pub mod runner;

use serde::Serialize;
use thiserror::Error;

use crate::models::roles::{Role, RoleSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardState {
    /// Role records are being fetched.
    Loading,
    /// The user holds no role yet and must pick client or creator.
    RoleSetup,
    /// The user holds at least one role and picks which dashboard to open.
    SelectionDialog { held: RoleSet },
    /// Exactly one dashboard is rendered.
    DashboardActive { active: Role, held: RoleSet },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    RolesLoaded(RoleSet),
    Choose(Role),
    RoleCreated(Role),
    RoleCreationFailed,
}

/// Side effect the caller must perform before feeding the outcome back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CreateRole(Role),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: DashboardState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: DashboardState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("cannot handle {event} while in {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

impl GateEvent {
    fn name(&self) -> &'static str {
        match self {
            GateEvent::RolesLoaded(_) => "roles_loaded",
            GateEvent::Choose(_) => "choose",
            GateEvent::RoleCreated(_) => "role_created",
            GateEvent::RoleCreationFailed => "role_creation_failed",
        }
    }
}

impl DashboardState {
    /// Entering the dashboard route always starts over from `Loading`.
    pub fn enter() -> Self {
        DashboardState::Loading
    }

    pub fn name(&self) -> &'static str {
        match self {
            DashboardState::Loading => "loading",
            DashboardState::RoleSetup => "role_setup",
            DashboardState::SelectionDialog { .. } => "selection_dialog",
            DashboardState::DashboardActive { .. } => "dashboard_active",
        }
    }

    pub fn held(&self) -> RoleSet {
        match self {
            DashboardState::SelectionDialog { held } | DashboardState::DashboardActive { held, .. } => {
                held.clone()
            }
            DashboardState::Loading | DashboardState::RoleSetup => RoleSet::new(),
        }
    }

    pub fn active(&self) -> Option<Role> {
        match self {
            DashboardState::DashboardActive { active, .. } => Some(*active),
            _ => None,
        }
    }

    pub fn apply(self, event: GateEvent) -> Result<Transition, GateError> {
        use DashboardState::*;

        match (self, event) {
            (Loading, GateEvent::RolesLoaded(held)) => Ok(Transition::to(if held.is_empty() {
                RoleSetup
            } else {
                SelectionDialog { held }
            })),

            (state @ (RoleSetup | SelectionDialog { .. } | DashboardActive { .. }), GateEvent::Choose(role)) => {
                let held = state.held();
                if held.contains(&role) {
                    Ok(Transition::to(DashboardActive { active: role, held }))
                } else {
                    Ok(Transition {
                        state,
                        effect: Some(Effect::CreateRole(role)),
                    })
                }
            }

            (state @ (RoleSetup | SelectionDialog { .. } | DashboardActive { .. }), GateEvent::RoleCreated(role)) => {
                let mut held = state.held();
                held.insert(role);
                Ok(Transition::to(DashboardActive { active: role, held }))
            }

            (state @ (RoleSetup | SelectionDialog { .. } | DashboardActive { .. }), GateEvent::RoleCreationFailed) => {
                Ok(Transition::to(state))
            }

            (state, event) => Err(GateError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            }),
        }
    }
}

/// One entry of the persistent dashboard switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwitcherEntry {
    pub role: Role,
    pub held: bool,
    pub active: bool,
}

/// The gate state plus the switcher the front end keeps on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateView {
    #[serde(flatten)]
    pub state: DashboardState,
    pub switcher: Vec<SwitcherEntry>,
}

impl From<DashboardState> for GateView {
    fn from(state: DashboardState) -> Self {
        let held = state.held();
        let active = state.active();
        let switcher = Role::ALL
            .iter()
            .map(|role| SwitcherEntry {
                role: *role,
                held: held.contains(role),
                active: active == Some(*role),
            })
            .collect();
        Self { state, switcher }
    }
}
