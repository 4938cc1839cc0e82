//! Role resolution against the external role-assignment store.

use async_trait::async_trait;
use attendance_commons::{Role, UserId};
use log::warn;

use crate::error::OauthResult;

/// Read-only access to the role-assignment store.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Fetch the raw role assignment for a user, `Ok(None)` when the user
    /// has no row.
    async fn role_for(&self, user_id: &UserId) -> OauthResult<Option<String>>;
}

/// Resolve a user's role, always succeeding with at least the baseline.
///
/// Elevated assignments narrow through [`Role::from_assignment`]; a missing
/// row, an out-of-vocabulary value, or any store failure resolves to
/// [`Role::User`]. Login never fails because the role table was unreachable.
pub async fn resolve_role(store: &dyn RoleStore, user_id: &UserId) -> Role {
    match store.role_for(user_id).await {
        Ok(Some(assignment)) => Role::from_assignment(&assignment),
        Ok(None) => Role::User,
        Err(e) => {
            warn!("Role lookup failed for {}: {}; defaulting to 'user'", user_id, e);
            Role::User
        }
    }
}
