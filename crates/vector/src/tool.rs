use std::sync::Arc;
use tracing::{info, warn};

use crate::manager::{IndexManager, QueryError};
use crate::types::QueryResult;

/// Tool name the agent framework registers
pub const TOOL_NAME: &str = "Restaurant_Info";

/// Tool description shown to the agent's language model
pub const TOOL_DESCRIPTION: &str = "Use this to get information about restaurants in Thailand \
including location, ratings, opening hours, and services";

pub const NO_MATCHES_MESSAGE: &str = "I couldn't find any restaurants matching your query.";
pub const UNAVAILABLE_MESSAGE: &str = "Restaurant data is currently unavailable.";
pub const NOT_READY_MESSAGE: &str =
    "Restaurant data is still being indexed. Please try again shortly.";

const RESULTS_HEADER: &str = "Here are the restaurants I found:";
const RESULT_SEPARATOR: &str = "\n\n---\n\n";

/// Free text in, formatted text out. Never fails.
#[derive(Clone)]
pub struct RestaurantTool {
    index: Arc<IndexManager>,
    top_k: usize,
}

impl RestaurantTool {
    pub fn new(index: Arc<IndexManager>, top_k: usize) -> Self {
        Self { index, top_k }
    }

    /// Query the index and render the outcome as text
    pub async fn run(&self, query: &str) -> String {
        info!("Querying restaurants with: {}", query);
        let outcome = self.index.query(query, self.top_k).await;
        if let Err(e) = &outcome {
            warn!("Restaurant query did not return results: {}", e);
        }
        render(&outcome)
    }
}

/// Render a query outcome for the agent
pub fn render(outcome: &Result<QueryResult, QueryError>) -> String {
    match outcome {
        Ok(documents) if documents.is_empty() => NO_MATCHES_MESSAGE.to_string(),
        Ok(documents) => {
            let body = documents
                .iter()
                .map(|d| d.trim())
                .collect::<Vec<_>>()
                .join(RESULT_SEPARATOR);
            format!("{}\n\n{}", RESULTS_HEADER, body)
        }
        Err(QueryError::Unavailable) => UNAVAILABLE_MESSAGE.to_string(),
        Err(QueryError::NotReady(_)) => NOT_READY_MESSAGE.to_string(),
        Err(QueryError::Embedding(detail)) | Err(QueryError::Retrieval(detail)) => {
            format!("Error searching restaurants: {}", detail)
        }
    }
}
