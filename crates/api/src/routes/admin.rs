//! Route definitions for the `/admin` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET   /users       -> list_users
/// PATCH /users/{id}  -> update_user_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", patch(admin::update_user_role))
}
