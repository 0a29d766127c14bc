//! DineRoute Vector Index
//!
//! Embedding-backed restaurant index: batch build, persistence and top-k search

mod manager;
mod similarity;
mod store;
mod tool;
mod types;

pub use manager::{BatchCommit, IndexConfig, IndexManager, QueryError, DEFAULT_BATCH_SIZE};
pub use similarity::cosine_similarity;
pub use store::PersistentStore;
pub use tool::{
    render, RestaurantTool, NOT_READY_MESSAGE, NO_MATCHES_MESSAGE, TOOL_DESCRIPTION, TOOL_NAME,
    UNAVAILABLE_MESSAGE,
};
pub use types::{IndexEntry, IndexState, IndexStats, QueryResult, SearchHit, StoreManifest};
