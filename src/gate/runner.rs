use sea_orm::{DatabaseConnection, DbErr};
use thiserror::Error;
use uuid::Uuid;

use super::{DashboardState, Effect, GateError, GateEvent};
use crate::db::roles as role_db;
use crate::models::roles::Role;

#[derive(Debug, Error)]
pub enum GateFailure {
    #[error("failed to load roles: {0}")]
    LoadRoles(#[source] DbErr),
    #[error("failed to create the {} role", .role.as_str())]
    CreateRole {
        role: Role,
        /// State the gate stays in.
        state: DashboardState,
        #[source]
        source: DbErr,
    },
    #[error(transparent)]
    Transition(#[from] GateError),
}

/// Fetch the user's roles and resolve the initial gate state.
pub async fn load(db: &DatabaseConnection, user_id: Uuid) -> Result<DashboardState, GateFailure> {
    let held = role_db::get_roles_for_user(db, user_id)
        .await
        .map_err(GateFailure::LoadRoles)?;

    Ok(DashboardState::enter()
        .apply(GateEvent::RolesLoaded(held))?
        .state)
}

/// Choose a dashboard, creating the role record first when it is not held.
///
/// Choosing a role the user already holds never writes.
pub async fn choose(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: Role,
) -> Result<DashboardState, GateFailure> {
    let current = load(db, user_id).await?;
    let transition = current.apply(GateEvent::Choose(role))?;

    let Some(Effect::CreateRole(role)) = transition.effect else {
        return Ok(transition.state);
    };

    match role_db::ensure_role(db, user_id, role).await {
        Ok(created) => {
            if created {
                tracing::info!(%user_id, role = role.as_str(), "role enabled from dashboard gate");
            }
            Ok(transition.state.apply(GateEvent::RoleCreated(role))?.state)
        }
        Err(source) => {
            let state = transition.state.apply(GateEvent::RoleCreationFailed)?.state;
            Err(GateFailure::CreateRole {
                role,
                state,
                source,
            })
        }
    }
}
