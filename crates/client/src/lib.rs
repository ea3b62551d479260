//! Paginated list consumer for the event API.
//!
//! A [`ListClient`] owns the query state of one list view (page, page size,
//! sort, filters), fetches pages through a [`Transport`], and exposes the
//! current rows plus [`PaginationState`] for rendering prev/next controls.
//!
//! Every fetch is tagged with a sequence number. A response that arrives
//! after a newer one has already been applied is dropped, so rapid
//! filter or page changes can never leave the view showing stale rows.

pub mod error;
pub mod list;
pub mod query;
pub mod state;
pub mod transport;

pub use error::ClientError;
pub use list::ListClient;
pub use query::ListQuery;
pub use state::{ErrorPolicy, ListView, PaginationState};
pub use transport::{HttpTransport, RawResponse, Transport};
