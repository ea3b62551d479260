//! Route definitions for the `/reviews` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /               -> list_reviews
/// POST   /               -> create_review (requires auth)
/// GET    /{id}           -> get_review
/// PATCH  /{id}           -> update_review (author or admin)
/// DELETE /{id}           -> delete_review (author or admin)
/// POST   /{id}/moderate  -> moderate_review (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route(
            "/{id}",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/{id}/moderate", post(reviews::moderate_review))
}
