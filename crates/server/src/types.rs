use dineroute_vector::IndexState;
use serde::{Deserialize, Serialize};

/// Restaurant search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query text
    pub q: String,

    /// Top K results (server default when absent)
    pub top_k: Option<usize>,
}

/// Restaurant search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Echoed query text
    pub query: String,

    /// Formatted tool output
    pub response: String,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub index_state: IndexState,
}

/// Query tool registration details
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
}

/// Error body for rejected requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
