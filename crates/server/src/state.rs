use dineroute_common::{AppConfig, Result};
use dineroute_llm::{Embedder, OllamaClient};
use dineroute_vector::{IndexConfig, IndexManager, RestaurantTool};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Restaurant vector index
    pub index: Arc<IndexManager>,

    /// Query tool backed by `index`
    pub tool: RestaurantTool,
}

impl AppState {
    /// Create new application state with the Ollama embedder
    pub fn new(config: AppConfig) -> Result<Self> {
        let embedder = OllamaClient::new(&config.ollama_base_url, &config.embedding_model)?;
        Ok(Self::with_embedder(config, Arc::new(embedder)))
    }

    /// Create application state around any embedder
    pub fn with_embedder(config: AppConfig, embedder: Arc<dyn Embedder>) -> Self {
        let index = Arc::new(IndexManager::new(IndexConfig::from(&config), embedder));
        let tool = RestaurantTool::new(Arc::clone(&index), config.query_top_k);

        Self {
            config,
            index,
            tool,
        }
    }
}
