/// Configuration management for the API server
///
/// This module loads configuration from environment variables (after reading
/// an optional `.env` file) and provides a type-safe configuration struct.
/// Every variable has a default, so the server starts with no environment.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 127.0.0.1)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://elearning.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `COURSE_CREATE_ATOMIC`: Run course creation in one transaction (default: false)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use elearning_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use elearning_shared::catalog::CommitMode;
use elearning_shared::db::pool::DatabaseConfig as PoolConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Course catalog behavior
    pub catalog: CatalogConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` = permissive)
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Course catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// How course creation commits its inserts
    pub commit_mode: CommitMode,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse
    /// (non-numeric port, non-boolean `COURSE_CREATE_ATOMIC`, ...).
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://elearning.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let atomic = env::var("COURSE_CREATE_ATOMIC")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|_| anyhow::anyhow!("COURSE_CREATE_ATOMIC must be 'true' or 'false'"))?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            catalog: CatalogConfig {
                commit_mode: if atomic {
                    CommitMode::Atomic
                } else {
                    CommitMode::PerStage
                },
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.max_connections.min(1),
            ..Default::default()
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
