use dineroute_common::{AppConfig, DineRouteError, Result};
use dineroute_llm::Embedder;
use dineroute_records::{load_records, to_document, NormalizedDocument};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::store::PersistentStore;
use crate::types::{IndexEntry, IndexState, IndexStats, QueryResult};

/// Default number of documents per embedding request
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Paths and batching for one index
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Restaurant dataset file
    pub data_path: PathBuf,

    /// Persisted store directory
    pub persist_dir: PathBuf,

    /// Documents per embed-and-commit batch
    pub batch_size: usize,
}

impl IndexConfig {
    pub fn new(data_path: impl Into<PathBuf>, persist_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            persist_dir: persist_dir.into(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

impl From<&AppConfig> for IndexConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            data_path: config.data_path.clone(),
            persist_dir: config.persist_dir.clone(),
            batch_size: config.index_batch_size,
        }
    }
}

/// How a batch reaches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchCommit {
    /// No store yet: the batch creates it
    CreateStore,
    /// Store exists: the batch is appended
    AppendToStore,
}

impl BatchCommit {
    pub fn select(store_exists: bool) -> Self {
        if store_exists {
            Self::AppendToStore
        } else {
            Self::CreateStore
        }
    }
}

/// Why a query produced no result list
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// Index building failed; terminal
    #[error("restaurant index is unavailable")]
    Unavailable,

    /// Index is not built yet
    #[error("restaurant index is not ready (state: {0})")]
    NotReady(IndexState),

    /// Query text could not be embedded
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// Store lookup failed
    #[error("retrieval failed: {0}")]
    Retrieval(String),
}

/// Builds, persists and queries the restaurant vector index
///
/// Construct one per process and share it behind an `Arc`. Queries are
/// rejected until [`IndexManager::initialize`] reaches [`IndexState::Ready`].
pub struct IndexManager {
    config: IndexConfig,
    embedder: Arc<dyn Embedder>,
    state: RwLock<IndexState>,
    store: RwLock<Option<PersistentStore>>,
    init_lock: Mutex<()>,
}

impl IndexManager {
    pub fn new(config: IndexConfig, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            config,
            embedder,
            state: RwLock::new(IndexState::Unloaded),
            store: RwLock::new(None),
            init_lock: Mutex::new(()),
        }
    }

    /// Current lifecycle state
    pub async fn state(&self) -> IndexState {
        *self.state.read().await
    }

    /// Open the persisted store, or build it from the dataset if absent
    ///
    /// Never returns an error: failures are logged and leave the manager in
    /// [`IndexState::Failed`]. Calling this again after the first run returns
    /// the current state without doing any work.
    pub async fn initialize(&self) -> IndexState {
        let _guard = self.init_lock.lock().await;

        let current = self.state().await;
        if current != IndexState::Unloaded {
            debug!("Index already initialized (state: {})", current);
            return current;
        }

        self.set_state(IndexState::Loading).await;
        let dir = &self.config.persist_dir;

        let outcome = if PersistentStore::exists(dir) {
            info!("Found existing vector store at {}, loading", dir.display());
            PersistentStore::open(dir).await.map(|store| {
                self.check_embedding_model(&store);
                store
            })
        } else {
            self.set_state(IndexState::Populating).await;
            self.populate().await
        };

        let next = match outcome {
            Ok(store) => {
                *self.store.write().await = Some(store);
                IndexState::Ready
            }
            Err(e) => {
                error!("Vector store initialization failed: {}", e);
                IndexState::Failed
            }
        };

        self.set_state(next).await;
        next
    }

    /// Top-k documents most similar to `text`
    pub async fn query(&self, text: &str, top_k: usize) -> std::result::Result<QueryResult, QueryError> {
        match self.state().await {
            IndexState::Ready => {}
            IndexState::Failed => return Err(QueryError::Unavailable),
            other => return Err(QueryError::NotReady(other)),
        }

        match self.store.read().await.as_ref() {
            None => return Err(QueryError::Unavailable),
            Some(store) if store.is_empty() || top_k == 0 => return Ok(Vec::new()),
            Some(_) => {}
        }

        // The store lock is not held while the backend embeds the query.
        debug!("Querying restaurants: {} (top_k={})", text, top_k);
        let embedding = self
            .embedder
            .embed(text)
            .await
            .map_err(|e| QueryError::Embedding(e.to_string()))?;

        let guard = self.store.read().await;
        let Some(store) = guard.as_ref() else {
            return Err(QueryError::NotReady(self.state().await));
        };

        let hits = store
            .search(&embedding, top_k)
            .map_err(|e| QueryError::Retrieval(e.to_string()))?;

        info!("Found {} results", hits.len());
        Ok(hits.into_iter().map(|h| h.text).collect())
    }

    /// Index statistics
    pub async fn stats(&self) -> IndexStats {
        let state = self.state().await;
        let guard = self.store.read().await;
        let (entries, embedding_model) = match guard.as_ref() {
            Some(store) => (store.len(), store.manifest().embedding_model.clone()),
            None => (0, self.embedder.model().to_string()),
        };

        IndexStats {
            state,
            entries,
            embedding_model,
            persist_dir: self.config.persist_dir.clone(),
        }
    }

    /// Release the in-memory store and return to [`IndexState::Unloaded`]
    pub async fn close(&self) {
        let _guard = self.init_lock.lock().await;
        *self.store.write().await = None;
        self.set_state(IndexState::Unloaded).await;
        debug!("Index closed");
    }

    async fn set_state(&self, state: IndexState) {
        debug!("Index state -> {}", state);
        *self.state.write().await = state;
    }

    fn check_embedding_model(&self, store: &PersistentStore) {
        let stored = &store.manifest().embedding_model;
        if stored != self.embedder.model() {
            warn!(
                "Vector store was built with embedding model '{}' but '{}' is configured; \
                 results will be unreliable until {} is deleted and rebuilt",
                stored,
                self.embedder.model(),
                store.dir().display()
            );
        }
    }

    /// Load, normalize, embed and commit the dataset in batches
    async fn populate(&self) -> Result<PersistentStore> {
        let records = load_records(&self.config.data_path)?;
        let dir = &self.config.persist_dir;

        if records.is_empty() {
            info!("No documents to process. Creating empty vector store.");
            return PersistentStore::create(dir, self.embedder.model(), Vec::new()).await;
        }

        let documents: Vec<NormalizedDocument> = records.iter().map(to_document).collect();
        let batch_size = self.config.batch_size.max(1);
        let total_batches = documents.len().div_ceil(batch_size);

        info!(
            "Creating vector store embeddings: {} documents in {} batches",
            documents.len(),
            total_batches
        );

        let progress = ProgressBar::new(documents.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} restaurants ({msg})",
        ) {
            progress.set_style(style);
        }

        let mut store: Option<PersistentStore> = None;

        for (batch_no, batch) in documents.chunks(batch_size).enumerate() {
            progress.set_message(format!("batch {}/{}", batch_no + 1, total_batches));
            info!("Processing batch {}/{}...", batch_no + 1, total_batches);

            let committed = store.as_ref().map_or(0, PersistentStore::len);
            if let Err(e) = self.commit_batch(&mut store, batch).await {
                progress.abandon();
                return match store {
                    None => Err(e),
                    Some(partial) => {
                        error!(
                            "Indexing stopped at batch {}/{}: {}. {} restaurants remain queryable.",
                            batch_no + 1,
                            total_batches,
                            e,
                            committed
                        );
                        Ok(partial)
                    }
                };
            }
            progress.inc(batch.len() as u64);
        }

        progress.finish_and_clear();

        let store = store.ok_or_else(|| DineRouteError::store("No batch was committed"))?;
        info!(
            "Vector store created and persisted. Total restaurants indexed: {}",
            store.len()
        );
        Ok(store)
    }

    /// Embed one batch and hand it to the store
    async fn commit_batch(
        &self,
        store: &mut Option<PersistentStore>,
        batch: &[NormalizedDocument],
    ) -> Result<BatchCommit> {
        let texts: Vec<String> = batch.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        if embeddings.len() != batch.len() {
            return Err(DineRouteError::embedding(format!(
                "Expected {} embeddings, got {}",
                batch.len(),
                embeddings.len()
            )));
        }

        let first_id = store.as_ref().map_or(0, PersistentStore::next_id);
        let entries: Vec<IndexEntry> = batch
            .iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (doc, embedding))| IndexEntry {
                id: (first_id + i).to_string(),
                text: doc.text.clone(),
                embedding,
                metadata: doc.metadata.clone(),
            })
            .collect();

        let step = BatchCommit::select(store.is_some());
        match step {
            BatchCommit::CreateStore => {
                let created =
                    PersistentStore::create(&self.config.persist_dir, self.embedder.model(), entries)
                        .await?;
                *store = Some(created);
            }
            BatchCommit::AppendToStore => {
                let Some(existing) = store.as_mut() else {
                    return Err(DineRouteError::store("Append requested before store creation"));
                };
                existing.append(entries).await?;
            }
        }

        Ok(step)
    }
}
