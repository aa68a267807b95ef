use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use store::{BackendConfig, StoreConfig, WriteMode};

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file holding the product document
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// How the document file is rewritten: "overwrite" or "atomic"
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            db_path: default_db_path(),
            write_mode: WriteMode::default(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the optional `server` config file, then
    /// `PRODUCTS_SERVER__*` environment variables, then `PORT`.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("PRODUCTS_SERVER").separator("__"))
            // Plain PORT wins, as most hosting platforms set it
            .set_override_option("port", std::env::var("PORT").ok())?;

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Document store settings derived from `db_path` and `write_mode`
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(BackendConfig::file(&self.db_path).with_write_mode(self.write_mode))
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db.json")
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
