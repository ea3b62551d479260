//! Page-window arithmetic shared by every list endpoint and the list client.
//!
//! Raw `page` / `limit` query values are untrusted strings. They are parsed
//! with a fallback to the defaults rather than rejected, and `limit` is capped
//! at [`MAX_PAGE_SIZE`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page number used when the caller omits `page` or sends garbage.
pub const DEFAULT_PAGE: i64 = 1;

/// Rows per page used when the caller omits `limit` or sends garbage.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Hard upper bound on rows per page.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Response headers
// ---------------------------------------------------------------------------

pub const HEADER_TOTAL_COUNT: &str = "x-total-count";
pub const HEADER_TOTAL_PAGES: &str = "x-total-pages";
pub const HEADER_CURRENT_PAGE: &str = "x-current-page";
pub const HEADER_PER_PAGE: &str = "x-per-page";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a positive integer, falling back to `default` for missing,
/// non-numeric, zero, or negative input.
pub fn parse_positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .unwrap_or(default)
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// `ceil(total / limit)`; zero rows means zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A validated request for one window of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Rows per page, within `1..=MAX_PAGE_SIZE`.
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request from already-numeric values, flooring at 1 and
    /// capping `limit`.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: clamp_limit(Some(limit), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    /// Build a request from raw query-string values.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_positive_or(page, DEFAULT_PAGE);
        let limit = parse_positive_or(limit, DEFAULT_PAGE_SIZE);
        Self::new(page, limit)
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

// ---------------------------------------------------------------------------
// PaginationMeta
// ---------------------------------------------------------------------------

/// Derived metadata describing a result window. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    pub fn new(request: &PageRequest, total: i64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: total_pages(total, request.limit),
        }
    }

    /// Rows the window is expected to hold: `min(limit, max(0, total - offset))`.
    pub fn expected_rows(&self) -> i64 {
        let offset = (self.page - 1).saturating_mul(self.limit);
        (self.total - offset).max(0).min(self.limit)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
