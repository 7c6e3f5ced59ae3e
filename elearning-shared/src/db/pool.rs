/// SQLite connection pool
///
/// One pool is opened at startup and shared by every request through
/// `AppState`. The course-creation chain checks out a single connection from
/// it for its whole sequence of statements.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tracing::{debug, info};

/// Pool settings
///
/// Timeouts are in seconds so they can come straight from environment
/// variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// e.g. "sqlite://elearning.db"
    pub url: String,

    /// SQLite serializes writers, so a small pool is enough.
    pub max_connections: u32,

    pub min_connections: u32,

    /// How long to wait for a free connection
    pub connect_timeout_seconds: u64,

    /// None = idle connections are kept
    pub idle_timeout_seconds: Option<u64>,

    pub max_lifetime_seconds: Option<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://elearning.db".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
        }
    }
}

/// Opens the pool and verifies the file answers a query
///
/// The database file must already exist; see
/// [`ensure_database_exists`](crate::db::migrations::ensure_database_exists).
///
/// # Errors
///
/// Returns an error if the URL is invalid, the file cannot be opened, or
/// the first query fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Opening SQLite pool"
    );

    let options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(config.idle_timeout_seconds.map(Duration::from_secs))
        .max_lifetime(config.max_lifetime_seconds.map(Duration::from_secs));

    let pool = options.connect(&config.url).await?;
    health_check(&pool).await?;

    Ok(pool)
}

/// Runs `SELECT 1` against the pool
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let (one,): (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;
    debug!(result = one, "Database probe answered");

    if one == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::Protocol(format!("unexpected probe result {one}")))
    }
}

/// Closes every connection so the SQLite file is released on shutdown
pub async fn close_pool(pool: SqlitePool) {
    pool.close().await;
    info!("SQLite pool closed");
}
