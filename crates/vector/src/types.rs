use chrono::{DateTime, Utc};
use dineroute_records::Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Current on-disk layout version
pub const STORE_FORMAT_VERSION: u32 = 1;

/// One persisted document with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Sequential entry ID assigned at commit time
    pub id: String,

    /// Document text returned by queries
    pub text: String,

    /// Embedding vector
    pub embedding: Vec<f32>,

    /// Scalar metadata
    pub metadata: Metadata,
}

/// Store-level information written once when the store is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreManifest {
    /// Embedding model used for every entry
    pub embedding_model: String,

    /// Embedding dimension (0 until the first entry is committed)
    pub dimensions: usize,

    /// Timestamp when the store was created
    pub created_at: DateTime<Utc>,

    /// On-disk layout version
    #[serde(default = "default_format_version")]
    pub format_version: u32,
}

fn default_format_version() -> u32 {
    STORE_FORMAT_VERSION
}

impl StoreManifest {
    pub fn new(embedding_model: impl Into<String>, dimensions: usize) -> Self {
        Self {
            embedding_model: embedding_model.into(),
            dimensions,
            created_at: Utc::now(),
            format_version: STORE_FORMAT_VERSION,
        }
    }
}

/// Search hit
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Cosine similarity to the query
    pub score: f32,

    /// Document text
    pub text: String,
}

/// Document texts, most similar first
pub type QueryResult = Vec<String>;

/// Lifecycle of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    Unloaded,
    Loading,
    Populating,
    Ready,
    Failed,
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Populating => "populating",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Index statistics
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub state: IndexState,
    pub entries: usize,
    pub embedding_model: String,
    pub persist_dir: PathBuf,
}
