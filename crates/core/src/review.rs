//! Review rating and moderation rules.
//!
//! Ratings are whole stars in `1..=5`. Every review carries a moderation
//! status; new reviews start as `pending`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Maximum length for a review body.
pub const MAX_REVIEW_BODY_LENGTH: usize = 5_000;

/// Maximum length for moderator notes.
pub const MAX_MODERATION_NOTES_LENGTH: usize = 2_000;

/// Message returned when a rating is out of range.
pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5.";

/// Message returned when a user reviews the same event twice.
pub const DUPLICATE_REVIEW: &str = "You have already reviewed this event.";

/* --------------------------------------------------------------------------
ModerationStatus
-------------------------------------------------------------------------- */

/// Review lifecycle tag controlling visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
    Flagged,
}

impl ModerationStatus {
    pub const ALL: [ModerationStatus; 4] = [
        ModerationStatus::Pending,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
        ModerationStatus::Flagged,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Flagged => "flagged",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModerationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid moderation status '{s}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a rating is within `MIN_RATING..=MAX_RATING`.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(RATING_OUT_OF_RANGE.to_string()))
    }
}

/// Validate that a rating range filter is well-formed.
pub fn validate_rating_range(min: Option<i32>, max: Option<i32>) -> Result<(), CoreError> {
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(CoreError::Validation(format!(
                "min_rating ({lo}) must not exceed max_rating ({hi})"
            )));
        }
    }
    Ok(())
}

/// Validate review text: non-blank and within the length limit.
pub fn validate_review_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "Review text is required.".to_string(),
        ));
    }
    if body.chars().count() > MAX_REVIEW_BODY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Review text must not exceed {MAX_REVIEW_BODY_LENGTH} characters."
        )));
    }
    Ok(())
}

/// Validate optional moderator notes.
pub fn validate_moderation_notes(notes: Option<&str>) -> Result<(), CoreError> {
    match notes {
        Some(n) if n.chars().count() > MAX_MODERATION_NOTES_LENGTH => {
            Err(CoreError::Validation(format!(
                "Moderation notes must not exceed {MAX_MODERATION_NOTES_LENGTH} characters."
            )))
        }
        _ => Ok(()),
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
