//! Integration tests for the database bootstrap
//!
//! Each test works on its own SQLite file inside a temporary directory.

use elearning_shared::db::{
    self,
    migrations::{ensure_database_exists, run_migrations},
    pool::{close_pool, create_pool, health_check, DatabaseConfig},
};
use sqlx::SqlitePool;
use tempfile::TempDir;

fn database_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("elearning.db").display())
}

async fn table_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\'",
    )
    .fetch_one(pool)
    .await
    .expect("count tables")
}

#[tokio::test]
async fn test_connect_creates_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("elearning.db");
    assert!(!path.exists());

    let pool = db::connect(DatabaseConfig {
        url: database_url(&dir),
        ..Default::default()
    })
    .await
    .expect("Failed to bootstrap database");

    assert!(path.exists(), "Database file should be created");
    assert!(health_check(&pool).await.is_ok());

    close_pool(pool).await;
}

#[tokio::test]
async fn test_connect_creates_all_catalog_tables() {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = db::connect(DatabaseConfig {
        url: database_url(&dir),
        ..Default::default()
    })
    .await
    .expect("Failed to bootstrap database");

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to list tables");

    assert_eq!(
        tables,
        vec![
            "certificates",
            "courses",
            "enrollments",
            "lessons",
            "modules",
            "payments",
            "users",
        ]
    );

    close_pool(pool).await;
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = database_url(&dir);

    ensure_database_exists(&url).await.expect("Failed to create database");
    let pool = create_pool(DatabaseConfig {
        url: url.clone(),
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    assert_eq!(table_count(&pool).await, 0);

    run_migrations(&pool).await.expect("First run failed");
    assert_eq!(table_count(&pool).await, 7);

    run_migrations(&pool).await.expect("Second run failed");
    assert_eq!(table_count(&pool).await, 7);

    let (applied,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(&pool)
        .await
        .expect("applied migrations");
    assert_eq!(applied, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_reopen_keeps_existing_data() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = DatabaseConfig {
        url: database_url(&dir),
        ..Default::default()
    };

    let pool = db::connect(config.clone()).await.expect("first open");
    sqlx::query(
        "INSERT INTO users (id, full_name, email, role, created_at)
         VALUES ('u1', 'A', 'a@x.com', 'student', '2025-01-01T00:00:00Z')",
    )
    .execute(&pool)
    .await
    .expect("insert");
    close_pool(pool).await;

    let pool = db::connect(config).await.expect("second open");
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 1);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_connect_with_unwritable_path_fails() {
    let result = db::connect(DatabaseConfig {
        url: "sqlite:///nonexistent-dir/definitely/missing/elearning.db".to_string(),
        connect_timeout_seconds: 2,
        ..Default::default()
    })
    .await;

    assert!(result.is_err(), "Should fail when the file cannot be created");
}
