//! The sequenced list client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use eventhub_core::pagination::{
    PaginationMeta, HEADER_CURRENT_PAGE, HEADER_PER_PAGE, HEADER_TOTAL_COUNT, HEADER_TOTAL_PAGES,
};
use eventhub_core::sorting::SortOrder;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;
use crate::query::ListQuery;
use crate::state::{ErrorPolicy, ListView, PaginationState};
use crate::transport::{RawResponse, Transport};

/// `{ "data": [...], "pagination": {...} }`. `pagination` may be absent, in
/// which case the `X-*` headers are used.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
    pagination: Option<PaginationMeta>,
}

/// `{ "error": ..., "code": ... }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    code: Option<String>,
}

struct Inner<T> {
    query: ListQuery,
    view: ListView<T>,
    /// Sequence number of the newest response applied to `view`.
    applied_seq: u64,
}

/// One paginated list view bound to an endpoint such as `/api/events`.
///
/// All methods take `&self`; fetches may overlap. Each fetch is numbered
/// when issued, and a response is applied only if no newer response has
/// been applied before it.
pub struct ListClient<T> {
    transport: Arc<dyn Transport>,
    path: String,
    policy: ErrorPolicy,
    next_seq: AtomicU64,
    inner: Mutex<Inner<T>>,
}

impl<T> ListClient<T>
where
    T: DeserializeOwned + Clone + Send,
{
    pub fn new(transport: Arc<dyn Transport>, path: impl Into<String>) -> Self {
        Self::with_query(transport, path, ListQuery::default())
    }

    pub fn with_query(
        transport: Arc<dyn Transport>,
        path: impl Into<String>,
        query: ListQuery,
    ) -> Self {
        let view = ListView::new(query.page, query.limit);
        Self {
            transport,
            path: path.into(),
            policy: ErrorPolicy::default(),
            next_seq: AtomicU64::new(0),
            inner: Mutex::new(Inner {
                query,
                view,
                applied_seq: 0,
            }),
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current rows, pagination and inline error.
    pub fn view(&self) -> ListView<T> {
        self.lock().view.clone()
    }

    /// Query that the next fetch will send.
    pub fn query(&self) -> ListQuery {
        self.lock().query.clone()
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Fetch with the current query.
    ///
    /// Returns `Ok(true)` if the response was applied, `Ok(false)` if it was
    /// discarded because a newer one already landed. A failed fetch is
    /// recorded in the view and also returned as `Err`.
    pub async fn refresh(&self) -> Result<bool, ClientError> {
        let (seq, pairs) = {
            let mut inner = self.lock();
            inner.view.loading = true;
            let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            (seq, inner.query.to_pairs())
        };

        let result = self
            .transport
            .get(&self.path, &pairs)
            .await
            .and_then(|raw| decode_page::<T>(&raw));

        let mut inner = self.lock();
        if seq < inner.applied_seq {
            tracing::debug!(seq, applied = inner.applied_seq, path = %self.path, "Discarding stale list response");
            return Ok(false);
        }
        inner.applied_seq = seq;
        inner.view.loading = seq < self.next_seq.load(Ordering::SeqCst);

        match result {
            Ok((items, pagination)) => {
                inner.view.items = items;
                inner.view.pagination = pagination;
                inner.view.error = None;
                Ok(true)
            }
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path, "List fetch failed");
                inner.view.error = Some(err.display_message());
                if self.policy == ErrorPolicy::Clear {
                    inner.view.items.clear();
                    inner.view.pagination =
                        PaginationState::empty(inner.query.page, inner.query.limit);
                }
                Err(err)
            }
        }
    }

    /// Go to the next page. No-op (`Ok(false)`) when "Next" is disabled.
    pub async fn next(&self) -> Result<bool, ClientError> {
        {
            let mut inner = self.lock();
            if !inner.view.pagination.has_next() {
                return Ok(false);
            }
            inner.query.page = inner.view.pagination.page + 1;
        }
        self.refresh().await
    }

    /// Go to the previous page. No-op (`Ok(false)`) when "Previous" is disabled.
    pub async fn prev(&self) -> Result<bool, ClientError> {
        {
            let mut inner = self.lock();
            if !inner.view.pagination.has_prev() {
                return Ok(false);
            }
            inner.query.page = inner.view.pagination.page - 1;
        }
        self.refresh().await
    }

    /// Jump to `page` (floored at 1) and fetch.
    pub async fn set_page(&self, page: i64) -> Result<bool, ClientError> {
        self.lock().query.page = page.max(1);
        self.refresh().await
    }

    /// Change page size (admin tables), return to page 1 and fetch.
    pub async fn set_limit(&self, limit: i64) -> Result<bool, ClientError> {
        {
            let mut inner = self.lock();
            inner.query = std::mem::take(&mut inner.query).with_limit(limit);
            inner.query.page = 1;
        }
        self.refresh().await
    }

    /// Set or clear (`None`) a filter, return to page 1 and fetch.
    pub async fn set_filter(&self, key: &str, value: Option<&str>) -> Result<bool, ClientError> {
        {
            let mut inner = self.lock();
            match value {
                Some(v) => {
                    inner.query.filters.insert(key.to_string(), v.to_string());
                }
                None => {
                    inner.query.filters.remove(key);
                }
            }
            inner.query.page = 1;
        }
        self.refresh().await
    }

    /// Change sorting, return to page 1 and fetch.
    pub async fn set_sort(&self, sort_by: &str, order: SortOrder) -> Result<bool, ClientError> {
        {
            let mut inner = self.lock();
            inner.query.sort_by = Some(sort_by.to_string());
            inner.query.sort_order = Some(order);
            inner.query.page = 1;
        }
        self.refresh().await
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode_page<T: DeserializeOwned>(
    raw: &RawResponse,
) -> Result<(Vec<T>, PaginationState), ClientError> {
    if !raw.is_success() {
        return Err(match serde_json::from_str::<ErrorBody>(&raw.body) {
            Ok(body) => ClientError::Api {
                status: raw.status,
                code: body.code,
                message: body.error,
            },
            Err(_) => ClientError::Api {
                status: raw.status,
                code: None,
                message: format!("Request failed with status {}", raw.status),
            },
        });
    }

    let envelope: Envelope<T> = serde_json::from_str(&raw.body)?;
    let pagination = match envelope.pagination {
        Some(meta) => PaginationState::from(meta),
        None => pagination_from_headers(raw).ok_or(ClientError::MissingPagination)?,
    };
    Ok((envelope.data, pagination))
}

fn pagination_from_headers(raw: &RawResponse) -> Option<PaginationState> {
    let read = |name: &str| raw.header(name)?.trim().parse::<i64>().ok();
    Some(PaginationState {
        page: read(HEADER_CURRENT_PAGE)?,
        limit: read(HEADER_PER_PAGE)?,
        total: read(HEADER_TOTAL_COUNT)?,
        pages: read(HEADER_TOTAL_PAGES)?,
    })
}
