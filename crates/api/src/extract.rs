//! Request extractors that reject with [`AppError`].
//!
//! axum's own `Json`, `Query` and `Path` answer malformed input with plain
//! text (and 422 for JSON bodies). These wrappers run the same extraction but
//! route the rejection through [`AppError`], so a missing field, a wrong type
//! or a bad path segment comes back as a 400 `{ "error", "code" }` body like
//! every other failure.
//!
//! Handlers import these in place of the axum types:
//!
//! ```ignore
//! use crate::extract::{Json, Path, Query};
//! ```

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

/// JSON request body. Also usable as a response, like `axum::Json`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
