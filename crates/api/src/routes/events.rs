//! Route definitions for the `/events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /       -> list_events
/// POST   /       -> create_event (admin)
/// GET    /{id}   -> get_event
/// PATCH  /{id}   -> update_event (owner or admin)
/// DELETE /{id}   -> delete_event (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route(
            "/{id}",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
}
