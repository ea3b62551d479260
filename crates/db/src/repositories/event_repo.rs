//! Repository for the `events` table.

use eventhub_core::pagination::PageRequest;
use eventhub_core::sorting::{EventSortField, Sort};
use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::{bind_values, bind_values_scalar, BindValue, FilterBuilder};
use crate::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "event_id, user_id, category_id, name, description, location, \
                        event_date, attendees, image_url, created_at, updated_at";

/// Provides CRUD and filtered listing for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (user_id, category_id, name, description, location, event_date, attendees, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(owner_id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.event_date)
            .bind(input.attendees)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE event_id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count events matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &EventFilter) -> Result<i64, sqlx::Error> {
        let builder = build_event_filter(filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM events {}",
            builder.where_clause()
        );
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), builder.values())
            .fetch_one(pool)
            .await
    }

    /// List one page of events matching the filter.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
        sort: &Sort<EventSortField>,
        page: &PageRequest,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let builder = build_event_filter(filter);
        let idx = builder.next_index();
        let query = format!(
            "SELECT {COLUMNS} FROM events {} {} LIMIT ${idx} OFFSET ${}",
            builder.where_clause(),
            sort.order_by_clause(),
            idx + 1
        );
        bind_values(sqlx::query_as::<_, Event>(&query), builder.values())
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Partially update an event.
    ///
    /// `COALESCE` keeps columns whose field is absent. The nullable columns
    /// use a "provided" flag so an explicit `null` clears them.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                category_id = CASE WHEN $2 THEN $3 ELSE category_id END,
                name = COALESCE($4, name),
                description = CASE WHEN $5 THEN $6 ELSE description END,
                location = COALESCE($7, location),
                event_date = COALESCE($8, event_date),
                attendees = COALESCE($9, attendees),
                image_url = CASE WHEN $10 THEN $11 ELSE image_url END
             WHERE event_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(input.category_id.is_some())
            .bind(input.category_id.flatten())
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(&input.location)
            .bind(input.event_date)
            .bind(input.attendees)
            .bind(input.image_url.is_some())
            .bind(input.image_url.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Physically delete an event. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn build_event_filter(filter: &EventFilter) -> FilterBuilder {
    let mut builder = FilterBuilder::new();
    builder.eq_opt("category_id", filter.category_id.map(BindValue::BigInt));
    builder.eq_opt("user_id", filter.user_id.map(BindValue::BigInt));
    if let Some(window) = filter.window {
        builder.push_static(window.predicate());
    }
    builder
}
