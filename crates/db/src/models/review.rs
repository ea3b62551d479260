//! Review entity model and DTOs.

use eventhub_core::review::ModerationStatus;
use eventhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub review_id: DbId,
    pub event_id: DbId,
    /// Author of the review.
    pub user_id: DbId,
    pub rating: i32,
    pub body: String,
    /// One of `pending`, `approved`, `rejected`, `flagged`.
    pub moderation_status: String,
    pub moderation_notes: Option<String>,
    pub moderated_by: Option<DbId>,
    pub moderated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a review. The author comes from the authenticated user.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub event_id: DbId,
    pub user_id: DbId,
    pub rating: i32,
    pub body: String,
}

/// DTO for an author/admin edit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReview {
    pub rating: Option<i32>,
    pub body: Option<String>,
}

/// DTO for a moderation decision.
#[derive(Debug, Clone)]
pub struct ModerateReview {
    pub status: ModerationStatus,
    pub notes: Option<String>,
    pub moderator_id: DbId,
}

/// Filters accepted by the reviews list.
#[derive(Debug, Default, Clone)]
pub struct ReviewFilter {
    pub event_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
    pub status: Option<ModerationStatus>,
}
