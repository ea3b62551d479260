//! Postgres persistence layer.
//!
//! The pool is built once by the binary with [`create_pool`], handed to the
//! HTTP layer through its state, and drained with [`close_pool`] after the
//! server stops accepting connections.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod filter;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a free connection before failing.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Postgres connection string.
    pub database_url: String,
    /// Pool size (default: `10`).
    pub max_connections: u32,
    /// Seconds to wait for a free connection (default: `30`).
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Load pool configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `DATABASE_URL`            | **yes**  | --      |
    /// | `DB_MAX_CONNECTIONS`      | no       | `10`    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is unset or a numeric variable does not parse.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
        }
    }
}

/// Create a connection pool from configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Wait for checked-out connections to return, then close the pool.
pub async fn close_pool(pool: &DbPool) {
    tracing::info!(
        size = pool.size(),
        idle = pool.num_idle(),
        "Draining database pool"
    );
    pool.close().await;
}
