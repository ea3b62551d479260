//! Shared query parameter types for list endpoints.
//!
//! Every field arrives as a raw string so malformed values can be handled by
//! policy rather than by the extractor: `page` / `limit` fall back to their
//! defaults, unknown `sort_by` / `sort_order` fall back to the entity's
//! default ordering, and malformed filter values are rejected with 400.

use eventhub_core::error::CoreError;
use eventhub_core::pagination::PageRequest;
use eventhub_core::sorting::{Sort, SortField, SortOrder};
use eventhub_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Paging and sorting parameters common to all list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }

    /// Resolve the sort against `F`'s allow-list, ignoring unknown tokens.
    pub fn sort<F: SortField>(&self) -> Sort<F> {
        if let Some(raw) = self.sort_by.as_deref() {
            if F::parse(raw).is_none() {
                tracing::debug!(sort_by = raw, "Ignoring sort_by outside allow-list");
            }
        }
        if let Some(raw) = self.sort_order.as_deref() {
            if SortOrder::parse(raw).is_none() {
                tracing::debug!(sort_order = raw, "Ignoring invalid sort_order");
            }
        }
        Sort::resolve(self.sort_by.as_deref(), self.sort_order.as_deref())
    }
}

/// Treat an empty query value (`?event_id=`) the same as an absent one.
pub fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an optional id filter. Non-numeric input is a validation error.
pub fn parse_id_filter(name: &str, raw: &Option<String>) -> AppResult<Option<DbId>> {
    parse_filter(name, raw)
}

/// Parse an optional integer filter. Non-numeric input is a validation error.
pub fn parse_int_filter(name: &str, raw: &Option<String>) -> AppResult<Option<i32>> {
    parse_filter(name, raw)
}

fn parse_filter<T: std::str::FromStr>(name: &str, raw: &Option<String>) -> AppResult<Option<T>> {
    match non_empty(raw) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_| {
            AppError::from(CoreError::Validation(format!(
                "Query parameter '{name}' must be an integer"
            )))
        }),
    }
}
