//! Event entity model and DTOs.

use eventhub_core::event::EventWindow;
use eventhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nullable;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub event_id: DbId,
    /// Owner (creator) of the event.
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub event_date: Timestamp,
    pub attendees: i32,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event. The owner comes from the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub event_date: Timestamp,
    pub attendees: Option<i32>,
    pub image_url: Option<String>,
}

/// DTO for a partial event update.
///
/// Absent fields are left alone. The nullable columns can be cleared by
/// sending an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<DbId>>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub location: Option<String>,
    pub event_date: Option<Timestamp>,
    pub attendees: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
}

/// Filters accepted by the events list.
#[derive(Debug, Default, Clone)]
pub struct EventFilter {
    pub category_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub window: Option<EventWindow>,
}
