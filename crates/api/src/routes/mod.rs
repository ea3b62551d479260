pub mod admin;
pub mod auth;
pub mod categories;
pub mod events;
pub mod health;
pub mod reviews;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/me                       current user (requires auth)
///
/// /events                        list (public), create (admin)
/// /events/{id}                   get (public), update, delete (owner or admin)
///
/// /categories                    list (public), create (admin)
/// /categories/{id}               get (public), update, delete (admin)
///
/// /reviews                       list (public), create (requires auth)
/// /reviews/{id}                  get (public), update, delete (author or admin)
/// /reviews/{id}/moderate         moderate (admin)
///
/// /admin/users                   list (admin)
/// /admin/users/{id}              change role (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/events", events::router())
        .nest("/categories", categories::router())
        .nest("/reviews", reviews::router())
        .nest("/admin", admin::router())
}
