use async_trait::async_trait;
use dineroute_common::Result;

/// Text embedding backend
///
/// Index-time and query-time embeddings must come from the same
/// implementation and model, otherwise similarity scores are meaningless.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Model identifier recorded alongside persisted embeddings
    fn model(&self) -> &str;

    /// Embed a batch of texts in one backend request.
    ///
    /// Returns one vector per input, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors.pop().ok_or_else(|| {
            dineroute_common::DineRouteError::embedding("backend returned no embedding")
        })
    }
}
