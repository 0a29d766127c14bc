use serde::{Deserialize, Serialize};

/// Ollama `/api/embed` request
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest {
    /// Model name (e.g., "nomic-embed-text")
    pub model: String,

    /// Texts to embed
    pub input: Vec<String>,
}

/// Ollama `/api/embed` response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedResponse {
    /// Model name
    #[serde(default)]
    pub model: String,

    /// One embedding per input text
    pub embeddings: Vec<Vec<f32>>,
}
