//! Repository for the `users` table.

use eventhub_core::pagination::PageRequest;
use eventhub_core::sorting::{Sort, UserSortField};
use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::filter::{bind_values, bind_values_scalar, BindValue, FilterBuilder};
use crate::models::user::{CreateUser, User, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, username, email, password_hash, role, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE user_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Count users matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &UserFilter) -> Result<i64, sqlx::Error> {
        let builder = build_user_filter(filter);
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM users {}",
            builder.where_clause()
        );
        bind_values_scalar(sqlx::query_scalar::<_, i64>(&query), builder.values())
            .fetch_one(pool)
            .await
    }

    /// List one page of users matching the filter.
    pub async fn list(
        pool: &PgPool,
        filter: &UserFilter,
        sort: &Sort<UserSortField>,
        page: &PageRequest,
    ) -> Result<Vec<User>, sqlx::Error> {
        let builder = build_user_filter(filter);
        let idx = builder.next_index();
        let query = format!(
            "SELECT {COLUMNS} FROM users {} {} LIMIT ${idx} OFFSET ${}",
            builder.where_clause(),
            sort.order_by_clause(),
            idx + 1
        );
        bind_values(sqlx::query_as::<_, User>(&query), builder.values())
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Change a user's role. Returns `None` if no such user exists.
    pub async fn update_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE user_id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }
}

fn build_user_filter(filter: &UserFilter) -> FilterBuilder {
    let mut builder = FilterBuilder::new();
    builder.eq_opt("role", filter.role.clone().map(BindValue::Text));
    builder
}
