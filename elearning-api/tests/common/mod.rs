//! Common test utilities for integration tests
//!
//! Each `TestContext` owns a fresh SQLite file in a temporary directory and
//! a router built on top of it.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use elearning_api::app::{build_router, AppState};
use elearning_api::config::{ApiConfig, CatalogConfig, Config, DatabaseConfig};
use elearning_shared::catalog::CommitMode;
use elearning_shared::db;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
    pub config: Config,
    _dir: TempDir,
}

impl TestContext {
    /// Creates a context in the default (per-stage) commit mode
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_commit_mode(CommitMode::PerStage).await
    }

    pub async fn with_commit_mode(commit_mode: CommitMode) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: format!("sqlite://{}", dir.path().join("elearning.db").display()),
                max_connections: 2,
            },
            catalog: CatalogConfig { commit_mode },
        };

        let db = db::connect(config.pool_config()).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            _dir: dir,
        })
    }

    /// Sends a request and returns status plus parsed JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())
            })
        };

        (status, json)
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Row counts across users, courses, modules, lessons
    pub async fn row_counts(&self) -> (i64, i64, i64, i64) {
        let mut counts = [0i64; 4];
        for (slot, table) in counts
            .iter_mut()
            .zip(["users", "courses", "modules", "lessons"])
        {
            let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&self.db)
                .await
                .unwrap();
            *slot = count;
        }
        (counts[0], counts[1], counts[2], counts[3])
    }
}
