//! Database Module
//!
//! PostgreSQL connection pool and schema bootstrap.
//!
//! The pool is created lazily so the HTTP listener can start while the
//! database is still unreachable; [`connect_in_background`] establishes the
//! first connection and applies migrations without blocking startup.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::DatabaseSettings;

/// Create a PostgreSQL connection pool without connecting yet.
///
/// Fails only if the connection URL cannot be parsed.
pub fn create_lazy_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect_lazy(&settings.url)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Connect and migrate on a background task.
///
/// A failure is logged and otherwise ignored: requests keep being served and
/// fail at the store until the database becomes reachable.
pub fn connect_in_background(pool: PgPool) -> JoinHandle<()> {
    tokio::spawn(async move {
        match run_migrations(&pool).await {
            Ok(()) => tracing::info!("Database connected successfully"),
            Err(e) => tracing::error!(error = %e, "Database connection failed"),
        }
    })
}
