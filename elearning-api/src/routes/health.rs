/// `GET /health`: liveness plus a database probe

use crate::app::AppState;
use axum::{extract::State, Json};
use elearning_shared::db::pool;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    pub version: String,
    /// "connected" or "disconnected"
    pub database: String,
}

/// Always answers 200; a failed probe is reported in the body
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = match pool::health_check(&state.db).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "SQLite probe failed");
            false
        }
    };

    let (status, database) = if reachable {
        ("healthy", "connected")
    } else {
        ("degraded", "disconnected")
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: elearning_shared::VERSION.to_string(),
        database: database.to_string(),
    })
}
