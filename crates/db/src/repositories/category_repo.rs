//! Repository for the `event_categories` table.

use eventhub_core::pagination::PageRequest;
use eventhub_core::sorting::{CategorySortField, Sort};
use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{CreateCategory, EventCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "category_id, name, description, created_at, updated_at";

/// Provides CRUD operations for event categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<EventCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_categories (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EventCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_categories WHERE category_id = $1");
        sqlx::query_as::<_, EventCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total number of categories.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM event_categories WHERE 1=1")
            .fetch_one(pool)
            .await
    }

    /// List one page of categories.
    pub async fn list(
        pool: &PgPool,
        sort: &Sort<CategorySortField>,
        page: &PageRequest,
    ) -> Result<Vec<EventCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM event_categories WHERE 1=1 {} LIMIT $1 OFFSET $2",
            sort.order_by_clause()
        );
        sqlx::query_as::<_, EventCategory>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Update a category. Absent fields are kept; an explicit `null`
    /// description clears it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<EventCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE event_categories SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END
             WHERE category_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM event_categories WHERE category_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
