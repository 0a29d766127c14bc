use async_trait::async_trait;
use dineroute_common::{DineRouteError, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::embedder::Embedder;
use crate::types::{EmbedRequest, EmbedResponse};

/// Ollama embedding API client
///
/// Each call makes a single attempt; failures are reported to the caller
/// and never retried here.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client for the given embedding model
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Ollama client initialized: {} (model: {})", base_url, model);
        Ok(Self {
            base_url,
            model,
            client,
        })
    }
}

#[async_trait]
impl Embedder for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        debug!(
            "Generating embeddings - Model: {}, Inputs: {}",
            self.model,
            texts.len()
        );

        let request = EmbedRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DineRouteError::embedding(format!("Failed to send embedding request: {}", e))
            })?
            .error_for_status()
            .map_err(|e| DineRouteError::embedding(format!("Ollama embedding API error: {}", e)))?;

        let result: EmbedResponse = response.json().await.map_err(|e| {
            DineRouteError::embedding(format!("Failed to parse embedding response: {}", e))
        })?;

        if result.embeddings.len() != texts.len() {
            return Err(DineRouteError::embedding(format!(
                "Expected {} embeddings from Ollama, got {}",
                texts.len(),
                result.embeddings.len()
            )));
        }

        if result.embeddings.iter().any(|e| e.is_empty()) {
            return Err(DineRouteError::embedding("Empty embedding from Ollama"));
        }

        debug!(
            "Received embeddings - Count: {}, Dimension: {}",
            result.embeddings.len(),
            result.embeddings[0].len()
        );
        Ok(result.embeddings)
    }
}
