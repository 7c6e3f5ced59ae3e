//! # E-Learning API Server
//!
//! Serves the course catalog over HTTP: create a course with its instructor,
//! modules and lessons, list courses, and fetch one course in full.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p elearning-api
//! ```

use elearning_api::{
    app::{build_router, AppState},
    config::Config,
};
use elearning_shared::db::{self, pool::close_pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "elearning_api=debug,elearning_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "E-Learning API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    tracing::info!(
        database_url = %config.database.url,
        commit_mode = ?config.catalog.commit_mode,
        "Configuration loaded"
    );

    let pool = db::connect(config.pool_config()).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
