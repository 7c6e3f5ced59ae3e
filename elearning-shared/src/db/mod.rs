/// Database layer for the e-learning catalog
///
/// This module provides the SQLite connection pool and the schema bootstrap.
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `migrations`: embedded schema that creates the seven catalog tables
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use elearning_shared::db::{self, pool::DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = db::connect(DatabaseConfig::default()).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

/// Errors raised while bringing the database up
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file could not be created or opened
    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),

    /// The schema could not be applied
    #[error("Database migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Opens the database, creating the file and tables if absent
///
/// This is the process-start bootstrap: ensure the file exists, build the
/// pool, then apply the embedded schema.
///
/// # Errors
///
/// Returns [`DbError::Connect`] if the file cannot be created or opened and
/// [`DbError::Migrate`] if the schema fails to apply.
pub async fn connect(config: pool::DatabaseConfig) -> Result<SqlitePool, DbError> {
    migrations::ensure_database_exists(&config.url).await?;

    let pool = pool::create_pool(config).await?;
    migrations::run_migrations(&pool).await?;

    info!("Database ready");
    Ok(pool)
}
