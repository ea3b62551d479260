//! Repository for the `reviews` table.

use eventhub_core::pagination::PageRequest;
use eventhub_core::sorting::{ReviewSortField, Sort};
use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::{bind_values, bind_values_scalar, BindValue, FilterBuilder};
use crate::models::review::{CreateReview, ModerateReview, Review, ReviewFilter, UpdateReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "review_id, event_id, user_id, rating, body, moderation_status, \
                        moderation_notes, moderated_by, moderated_at, created_at, updated_at";

/// Unique constraint guarding one review per user per event.
pub const UQ_EVENT_USER: &str = "uq_reviews_event_user";

/// Provides CRUD, moderation, and filtered listing for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review in `pending` status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (event_id, user_id, rating, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.event_id)
            .bind(input.user_id)
            .bind(input.rating)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a review by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE review_id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `user_id` has already reviewed `event_id`.
    pub async fn exists_for_event_and_user(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Count reviews matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &ReviewFilter) -> Result<i64, sqlx::Error> {
        let builder = build_review_filter(filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM reviews {}",
            builder.where_clause()
        );
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), builder.values())
            .fetch_one(pool)
            .await
    }

    /// List one page of reviews matching the filter.
    pub async fn list(
        pool: &PgPool,
        filter: &ReviewFilter,
        sort: &Sort<ReviewSortField>,
        page: &PageRequest,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let builder = build_review_filter(filter);
        let idx = builder.next_index();
        let query = format!(
            "SELECT {COLUMNS} FROM reviews {} {} LIMIT ${idx} OFFSET ${}",
            builder.where_clause(),
            sort.order_by_clause(),
            idx + 1
        );
        bind_values(sqlx::query_as::<_, Review>(&query), builder.values())
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Edit rating and/or body. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                rating = COALESCE($2, rating),
                body = COALESCE($3, body)
             WHERE review_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Record a moderation decision with moderator and timestamp.
    pub async fn moderate(
        pool: &PgPool,
        id: DbId,
        input: &ModerateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                moderation_status = $2,
                moderation_notes = $3,
                moderated_by = $4,
                moderated_at = NOW()
             WHERE review_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.status.as_str())
            .bind(&input.notes)
            .bind(input.moderator_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a review. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn build_review_filter(filter: &ReviewFilter) -> FilterBuilder {
    let mut builder = FilterBuilder::new();
    builder.eq_opt("event_id", filter.event_id.map(BindValue::BigInt));
    builder.eq_opt("user_id", filter.user_id.map(BindValue::BigInt));
    if let Some(min) = filter.min_rating {
        builder.push("rating", ">=", BindValue::Int(min));
    }
    if let Some(max) = filter.max_rating {
        builder.push("rating", "<=", BindValue::Int(max));
    }
    builder.eq_opt(
        "moderation_status",
        filter
            .status
            .map(|s| BindValue::Text(s.as_str().to_string())),
    );
    builder
}

#[cfg(test)]
mod tests {
    use eventhub_core::review::ModerationStatus;

    use super::*;

    #[test]
    fn review_filter_binds_every_present_field() {
        let filter = ReviewFilter {
            event_id: Some(3),
            user_id: None,
            min_rating: Some(2),
            max_rating: Some(4),
            status: Some(ModerationStatus::Approved),
        };
        let builder = build_review_filter(&filter);
        assert_eq!(
            builder.where_clause(),
            "WHERE 1=1 AND event_id = $1 AND rating >= $2 AND rating <= $3 \
             AND moderation_status = $4"
        );
        assert_eq!(builder.next_index(), 5);
    }

    #[test]
    fn empty_review_filter_matches_everything() {
        let builder = build_review_filter(&ReviewFilter::default());
        assert_eq!(builder.where_clause(), "WHERE 1=1");
    }
}
