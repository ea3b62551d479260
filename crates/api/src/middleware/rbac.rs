//! Role and ownership rules for writes.
//!
//! Category writes, moderation and the admin user table take
//! [`RequireAdmin`] as a handler argument. Event and review edits load the
//! row first and then call [`AuthUser::ensure_owner_or_admin`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eventhub_core::error::CoreError;
use eventhub_core::types::DbId;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Handler argument for admin-only routes.
///
/// A missing or bad token is still a 401 from [`AuthUser`]; a valid
/// non-admin token is a 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(RequireAdmin(user))
        } else {
            Err(forbidden("Admin role required".to_string()))
        }
    }
}

impl AuthUser {
    /// Let the owner of a row, or any admin, through.
    pub fn ensure_owner_or_admin(&self, owner_id: DbId, what: &str) -> Result<(), AppError> {
        if self.user_id == owner_id || self.is_admin() {
            return Ok(());
        }
        tracing::debug!(user_id = self.user_id, owner_id, what, "Rejected write by non-owner");
        Err(forbidden(format!(
            "Only the owner or an admin may modify this {what}"
        )))
    }
}

fn forbidden(message: String) -> AppError {
    AppError::Core(CoreError::Forbidden(message))
}
