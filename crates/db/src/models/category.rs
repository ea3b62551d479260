//! Event category entity model and DTOs.

use eventhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::nullable;

/// A row from the `event_categories` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct EventCategory {
    pub category_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a category. Absent fields are left alone; an explicit
/// `null` description clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}
