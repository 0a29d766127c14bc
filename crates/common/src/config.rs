use crate::error::DineRouteError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// DineRoute application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Restaurant dataset file (JSON array)
    pub data_path: PathBuf,

    /// Persisted vector store directory
    pub persist_dir: PathBuf,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Number of documents embedded and committed per batch
    pub index_batch_size: usize,

    /// Default number of results per query
    pub query_top_k: usize,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data/thailand_restaurants.json"),
            persist_dir: PathBuf::from("./restaurant_db"),
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            index_batch_size: 100,
            query_top_k: 10,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, DineRouteError> {
        // Load .env file (ignore if not exists)
        dotenv::dotenv().ok();

        let defaults = Self::default();
        let config = Self {
            data_path: Self::get_env_path("DATA_PATH").unwrap_or(defaults.data_path),
            persist_dir: Self::get_env_path("PERSIST_DIR").unwrap_or(defaults.persist_dir),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            index_batch_size: Self::get_env_parsed("INDEX_BATCH_SIZE")?
                .unwrap_or(defaults.index_batch_size),
            query_top_k: Self::get_env_parsed("QUERY_TOP_K")?.unwrap_or(defaults.query_top_k),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT")?.unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Parse a numeric environment variable, rejecting malformed values
    fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, DineRouteError> {
        match std::env::var(key) {
            Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
                DineRouteError::config(format!("{} must be a number, got '{}'", key, raw))
            }),
            Err(_) => Ok(None),
        }
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DineRouteError> {
        if self.embedding_model.is_empty() {
            return Err(DineRouteError::config("Embedding model name cannot be empty"));
        }

        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://")
        {
            return Err(DineRouteError::config(
                "Ollama base URL must start with http:// or https://",
            ));
        }

        if self.index_batch_size == 0 {
            return Err(DineRouteError::config("Index batch size cannot be 0"));
        }

        if self.query_top_k == 0 {
            return Err(DineRouteError::config("Query top_k cannot be 0"));
        }

        if self.server_port == 0 {
            return Err(DineRouteError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
