use dineroute_common::{DineRouteError, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::similarity::cosine_similarity;
use crate::types::{IndexEntry, SearchHit, StoreManifest};

const MANIFEST_FILE: &str = "manifest.json";
const ENTRIES_FILE: &str = "entries.jsonl";

/// Vector store persisted as a directory
///
/// `manifest.json` describes the store and `entries.jsonl` holds one
/// [`IndexEntry`] per line. Entries are also kept in memory for search.
#[derive(Debug)]
pub struct PersistentStore {
    dir: PathBuf,
    manifest: StoreManifest,
    entries: Vec<IndexEntry>,
}

impl PersistentStore {
    /// Whether a store directory is present. This alone decides if indexing is skipped.
    pub fn exists(dir: &Path) -> bool {
        dir.exists()
    }

    /// Create the store directory and commit the first batch
    ///
    /// The store is written to a sibling staging directory and renamed into
    /// place, so `dir` only appears once it holds a valid manifest.
    pub async fn create(
        dir: &Path,
        embedding_model: &str,
        entries: Vec<IndexEntry>,
    ) -> Result<Self> {
        let dimensions = entries.first().map(|e| e.embedding.len()).unwrap_or(0);
        check_dimensions(&entries, dimensions)?;

        let staging = staging_dir(dir);
        if staging.exists() {
            warn!("Removing leftover staging directory {}", staging.display());
            tokio::fs::remove_dir_all(&staging).await?;
        }
        tokio::fs::create_dir_all(&staging).await.map_err(|e| {
            DineRouteError::store(format!(
                "Failed to create store directory {}: {}",
                staging.display(),
                e
            ))
        })?;

        let mut store = Self {
            dir: staging.clone(),
            manifest: StoreManifest::new(embedding_model, dimensions),
            entries: Vec::new(),
        };
        if let Err(e) = store.stage(entries, dir).await {
            if let Err(cleanup) = tokio::fs::remove_dir_all(&staging).await {
                warn!("Failed to remove {}: {}", staging.display(), cleanup);
            }
            return Err(e);
        }
        store.dir = dir.to_path_buf();

        info!(
            "Vector store created at {} ({} entries)",
            dir.display(),
            store.len()
        );
        Ok(store)
    }

    /// Write the manifest and first entries into the staging directory, then publish it
    async fn stage(&mut self, entries: Vec<IndexEntry>, dir: &Path) -> Result<()> {
        self.write_manifest().await?;
        tokio::fs::write(self.entries_path(), b"").await?;
        self.write_entries(entries).await?;
        tokio::fs::rename(&self.dir, dir).await.map_err(|e| {
            DineRouteError::store(format!(
                "Failed to move {} to {}: {}",
                self.dir.display(),
                dir.display(),
                e
            ))
        })
    }

    /// Open an existing store directory
    pub async fn open(dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_data = tokio::fs::read_to_string(&manifest_path)
            .await
            .map_err(|e| {
                DineRouteError::store(format!(
                    "Failed to read {}: {}",
                    manifest_path.display(),
                    e
                ))
            })?;
        let manifest: StoreManifest = serde_json::from_str(&manifest_data).map_err(|e| {
            DineRouteError::store(format!("Corrupt store manifest {}: {}", manifest_path.display(), e))
        })?;

        let entries_path = dir.join(ENTRIES_FILE);
        let data = match tokio::fs::read_to_string(&entries_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let entries = parse_entries(&data)?;
        check_dimensions(&entries, manifest.dimensions)?;

        info!(
            "Vector store opened at {} - {} entries (model: {})",
            dir.display(),
            entries.len(),
            manifest.embedding_model
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            manifest,
            entries,
        })
    }

    /// Append a batch to an existing store
    pub async fn append(&mut self, entries: Vec<IndexEntry>) -> Result<()> {
        if self.manifest.dimensions == 0 {
            if let Some(first) = entries.first() {
                self.manifest.dimensions = first.embedding.len();
                self.write_manifest().await?;
            }
        }
        check_dimensions(&entries, self.manifest.dimensions)?;
        self.write_entries(entries).await
    }

    /// Top-k entries by cosine similarity, most similar first
    ///
    /// Ties keep commit order.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        if self.entries.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        if query.len() != self.manifest.dimensions {
            return Err(DineRouteError::retrieval(format!(
                "Query embedding has dimension {}, store expects {}",
                query.len(),
                self.manifest.dimensions
            )));
        }

        let mut hits: Vec<SearchHit> = self
            .entries
            .iter()
            .map(|entry| SearchHit {
                score: cosine_similarity(query, &entry.embedding),
                text: entry.text.clone(),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);

        debug!("Search returned {} of {} entries", hits.len(), self.entries.len());
        Ok(hits)
    }

    /// ID for the next committed entry
    pub fn next_id(&self) -> usize {
        self.entries.len()
    }

    pub fn manifest(&self) -> &StoreManifest {
        &self.manifest
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entries_path(&self) -> PathBuf {
        self.dir.join(ENTRIES_FILE)
    }

    async fn write_manifest(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.manifest)?;
        tokio::fs::write(self.dir.join(MANIFEST_FILE), data).await?;
        Ok(())
    }

    /// Append entries to disk first, then to memory
    async fn write_entries(&mut self, entries: Vec<IndexEntry>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut buf = String::new();
        for entry in &entries {
            buf.push_str(&serde_json::to_string(entry)?);
            buf.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(self.entries_path())
            .await
            .map_err(|e| {
                DineRouteError::store(format!(
                    "Failed to open {}: {}",
                    self.entries_path().display(),
                    e
                ))
            })?;
        file.write_all(buf.as_bytes()).await?;
        file.flush().await?;

        self.entries.extend(entries);
        Ok(())
    }
}

fn staging_dir(dir: &Path) -> PathBuf {
    let mut name = dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".partial");
    dir.with_file_name(name)
}

/// Parse `entries.jsonl`. An unparseable final line is treated as an
/// interrupted write and skipped; anywhere else it is corruption.
fn parse_entries(data: &str) -> Result<Vec<IndexEntry>> {
    let lines: Vec<&str> = data.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut entries = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        match serde_json::from_str::<IndexEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(e) if i + 1 == lines.len() => {
                warn!("Skipping truncated final store entry: {}", e);
            }
            Err(e) => {
                return Err(DineRouteError::store(format!(
                    "Corrupt store entry on line {}: {}",
                    i + 1,
                    e
                )));
            }
        }
    }

    Ok(entries)
}

fn check_dimensions(entries: &[IndexEntry], dimensions: usize) -> Result<()> {
    match entries.iter().find(|e| e.embedding.len() != dimensions) {
        Some(bad) => Err(DineRouteError::store(format!(
            "Entry {} has embedding dimension {}, expected {}",
            bad.id,
            bad.embedding.len(),
            dimensions
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dineroute_records::Metadata;

    fn entry(id: usize, text: &str, embedding: Vec<f32>) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            text: text.to_string(),
            embedding,
            metadata: Metadata::new(),
        }
    }

    #[tokio::test]
    async fn test_create_then_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("restaurant_db");

        let mut store = PersistentStore::create(
            &dir,
            "nomic-embed-text",
            vec![entry(0, "Thai Spice", vec![1.0, 0.0])],
        )
        .await
        .unwrap();
        store
            .append(vec![entry(1, "Som Tam Nua", vec![0.0, 1.0])])
            .await
            .unwrap();
        assert!(PersistentStore::exists(&dir));

        let reopened = PersistentStore::open(&dir).await.unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.manifest().dimensions, 2);
        assert_eq!(reopened.manifest().embedding_model, "nomic-embed-text");
    }

    #[tokio::test]
    async fn test_search_orders_and_bounds() {
        let tmp = tempfile::tempdir().unwrap();
        let store = PersistentStore::create(
            &tmp.path().join("db"),
            "m",
            vec![
                entry(0, "far", vec![0.0, 1.0]),
                entry(1, "near", vec![1.0, 0.1]),
                entry(2, "exact", vec![1.0, 0.0]),
            ],
        )
        .await
        .unwrap();

        let hits = store.search(&[1.0, 0.0], 2).unwrap();
        let texts: Vec<_> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["exact", "near"]);

        assert_eq!(store.search(&[1.0, 0.0], 10).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_dimension_mismatch_is_retrieval_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("db");
        let store = PersistentStore::create(&dir, "m", vec![entry(0, "a", vec![1.0, 0.0])])
            .await
            .unwrap();

        let err = store.search(&[1.0, 0.0, 0.0], 5).unwrap_err();
        assert!(matches!(err, DineRouteError::Retrieval(_)));
    }

    #[tokio::test]
    async fn test_empty_store_search() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("db");
        PersistentStore::create(&dir, "m", Vec::new()).await.unwrap();

        let store = PersistentStore::open(&dir).await.unwrap();
        assert!(store.is_empty());
        assert!(store.search(&[1.0], 10).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mixed_dimensions_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("db");
        let mut store = PersistentStore::create(&dir, "m", vec![entry(0, "a", vec![1.0, 0.0])])
            .await
            .unwrap();

        let err = store.append(vec![entry(1, "b", vec![1.0])]).await.unwrap_err();
        assert!(matches!(err, DineRouteError::Store(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_create_replaces_leftover_staging_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("restaurant_db");
        let staging = tmp.path().join("restaurant_db.partial");
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join(ENTRIES_FILE), "half-written").unwrap();
        assert!(!PersistentStore::exists(&dir));

        let store = PersistentStore::create(&dir, "m", vec![entry(0, "a", vec![1.0])])
            .await
            .unwrap();
        assert_eq!(store.dir(), dir.as_path());
        assert!(!staging.exists());

        let reopened = PersistentStore::open(&dir).await.unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_create_cleans_up_staging() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("restaurant_db");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("unrelated"), "x").unwrap();

        let result = PersistentStore::create(&dir, "m", vec![entry(0, "a", vec![1.0])]).await;
        assert!(matches!(result, Err(DineRouteError::Store(_))));
        assert!(!tmp.path().join("restaurant_db.partial").exists());
        assert!(dir.join("unrelated").exists());
    }

    #[test]
    fn test_truncated_final_line_is_skipped() {
        let good = serde_json::to_string(&entry(0, "a", vec![1.0])).unwrap();
        let data = format!("{}\n{{\"id\":\"1\",\"te", good);
        assert_eq!(parse_entries(&data).unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_middle_line_is_an_error() {
        let good = serde_json::to_string(&entry(0, "a", vec![1.0])).unwrap();
        let data = format!("not json\n{}\n", good);
        assert!(parse_entries(&data).is_err());
    }
}
