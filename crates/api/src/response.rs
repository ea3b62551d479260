//! Shared response envelope types for API handlers.
//!
//! Single-entity responses use the `{ "data": ... }` envelope. List
//! endpoints use [`Paginated`], which adds a `pagination` block to the body
//! and mirrors it in the `X-Total-Count`, `X-Total-Pages`, `X-Current-Page`
//! and `X-Per-Page` response headers.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use eventhub_core::pagination::{
    PageRequest, PaginationMeta, HEADER_CURRENT_PAGE, HEADER_PER_PAGE, HEADER_TOTAL_COUNT,
    HEADER_TOTAL_PAGES,
};
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: item }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a list: `{ "data": [...], "pagination": {...} }` plus headers.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, request: &PageRequest, total: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(request, total),
        }
    }

    /// Convert the rows while keeping the pagination block.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Build the four pagination headers for `meta`.
pub fn pagination_headers(meta: &PaginationMeta) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in [
        (HEADER_TOTAL_COUNT, meta.total),
        (HEADER_TOTAL_PAGES, meta.pages),
        (HEADER_CURRENT_PAGE, meta.page),
        (HEADER_PER_PAGE, meta.limit),
    ] {
        headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
    }
    headers
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let headers = pagination_headers(&self.pagination);
        (headers, Json(self)).into_response()
    }
}
