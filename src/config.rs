use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// How long a request waits for a free connection before failing.
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            pool_size: default_pool_size(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_db_path() -> PathBuf {
    PathBuf::from("trendlens.db")
}
fn default_pool_size() -> usize {
    8
}
fn default_acquire_timeout_ms() -> u64 {
    5000
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.database.pool_size == 0 {
            return Err("database.pool_size must be at least 1. \
                 Set it in config.toml or via TRENDLENS__DATABASE__POOL_SIZE env var."
                .to_string());
        }
        if self.database.acquire_timeout_ms == 0 {
            return Err("database.acquire_timeout_ms must be at least 1. \
                 Set it in config.toml or via TRENDLENS__DATABASE__ACQUIRE_TIMEOUT_MS env var."
                .to_string());
        }
        if self.database.path.as_os_str().is_empty() {
            return Err("database.path must not be empty. \
                 Set it in config.toml or via TRENDLENS__DATABASE__PATH env var."
                .to_string());
        }
        Ok(())
    }

    pub fn load(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        // Values from .env become plain environment variables
        dotenv::dotenv().ok();

        let mut builder = Config::builder();

        let path = config_path.unwrap_or("config.toml");
        builder = builder.add_source(File::with_name(path).required(false));

        // Overlay with environment variables (TRENDLENS__SERVER__PORT=5001, etc.)
        builder = builder.add_source(
            Environment::with_prefix("TRENDLENS")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
