//! DineRoute embedding backend
//!
//! Ollama embedding API client behind the [`Embedder`] trait

mod client;
mod embedder;
mod types;

pub use client::OllamaClient;
pub use embedder::Embedder;
pub use types::{EmbedRequest, EmbedResponse};
