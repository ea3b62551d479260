//! Rendered state of a list view.

use eventhub_core::pagination::PaginationMeta;

/// Pagination controls state: `{page, limit, total, pages}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationState {
    /// State before anything has been loaded.
    pub fn empty(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            total: 0,
            pages: 0,
        }
    }

    /// "Previous" is enabled.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// "Next" is enabled.
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

impl From<PaginationMeta> for PaginationState {
    fn from(meta: PaginationMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total: meta.total,
            pages: meta.pages,
        }
    }
}

/// What a failed fetch does to rows already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Keep showing the previous rows next to the error.
    #[default]
    KeepStale,
    /// Drop the rows and reset totals.
    Clear,
}

/// Snapshot of one list view.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub pagination: PaginationState,
    /// Inline error from the most recent fetch, cleared on success.
    pub error: Option<String>,
    /// A fetch has been issued and no newer response applied yet.
    pub loading: bool,
}

impl<T> ListView<T> {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            items: Vec::new(),
            pagination: PaginationState::empty(page, limit),
            error: None,
            loading: false,
        }
    }
}
