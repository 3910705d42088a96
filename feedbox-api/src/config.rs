/// Configuration management for the API server
///
/// Configuration is read from environment variables (after loading a `.env`
/// file if one exists) through the `config` crate. Nested keys use a double
/// underscore, all under the `FEEDBOX` prefix.
///
/// # Environment Variables
///
/// - `FEEDBOX__SERVER__HOST`: Host to bind to (default: 0.0.0.0)
/// - `FEEDBOX__SERVER__PORT`: Port to bind to (default: 8080)
/// - `FEEDBOX__DATABASE__HOST`: PostgreSQL host (default: localhost)
/// - `FEEDBOX__DATABASE__PORT`: PostgreSQL port (default: 5432)
/// - `FEEDBOX__DATABASE__USER`: PostgreSQL role (default: postgres)
/// - `FEEDBOX__DATABASE__PASSWORD`: PostgreSQL password (default: postgres)
/// - `FEEDBOX__DATABASE__DATABASE`: Database name (default: feedbox)
/// - `FEEDBOX__DATABASE__MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_URL`: Full connection string, overrides the discrete settings
/// - `RUST_LOG`: Log filter (default: feedbox_api=debug,feedbox_shared=debug,tower_http=debug)
/// - `LOG_FORMAT`: `json` for JSON log lines (default: human-readable)
///
/// # Example
///
/// ```no_run
/// use feedbox_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::load()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use feedbox_shared::db::pool::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database connection and pool configuration
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but has an invalid value
    /// (for example a non-numeric port).
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FEEDBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config = Self::from_settings(settings)?;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = Some(url);
        }

        Ok(config)
    }

    /// Builds configuration from already-collected settings
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_settings(settings: config::Config) -> anyhow::Result<Self> {
        Ok(settings.try_deserialize()?)
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
