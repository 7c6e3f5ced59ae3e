/// Schema bootstrap
///
/// The catalog schema lives in `migrations/` next to this crate's
/// `Cargo.toml` and is embedded at compile time with `sqlx::migrate!`.
/// Every statement uses `IF NOT EXISTS`, so running it against a database
/// created by an earlier build is harmless.

use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use tracing::{debug, info, warn};

/// Creates the seven catalog tables if they are absent
///
/// # Errors
///
/// Returns an error if a statement fails or a previously applied schema
/// file no longer matches its embedded checksum.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!("./migrations");
    debug!(embedded = migrator.migrations.len(), "Applying catalog schema");

    migrator.run(pool).await.map_err(|e| {
        warn!(error = %e, "Catalog schema could not be applied");
        e
    })?;

    info!("Catalog schema ready");
    Ok(())
}

/// Creates the SQLite file behind `database_url` if it is missing
///
/// # Errors
///
/// Returns an error if the file cannot be created (bad path, permissions).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Sqlite::database_exists(database_url).await? {
        debug!(url = %database_url, "Database file present");
        return Ok(());
    }

    info!(url = %database_url, "Creating database file");
    Sqlite::create_database(database_url).await
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_schema_is_embedded() {
        let migrator = sqlx::migrate!("./migrations");
        assert_eq!(migrator.migrations.len(), 1);
    }

    // Tests against a real database file are in tests/db_bootstrap_tests.rs
}
