//! On-disk embedding cache.
//!
//! Maps segment text to its embedding vector so repeated runs skip the
//! embedding provider for unchanged segments. The cache lives in a single
//! JSON file, loaded at startup and flushed after new vectors are computed.
//! A missing or malformed file degrades to an empty cache so first runs
//! always succeed.

use crate::embedding::Embedder;
use crate::error::{Result, SvarError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Cache file format version.
const CACHE_VERSION: u32 = 1;

/// Serialized form of the cache.
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    /// Embedding model the vectors were generated with. Vectors from
    /// different models are not comparable, so a mismatch invalidates
    /// the whole file.
    model: String,
    generated_at: DateTime<Utc>,
    entries: BTreeMap<String, Vec<f32>>,
}

/// In-memory embedding cache keyed by segment text.
pub struct EmbeddingCache {
    model: String,
    entries: BTreeMap<String, Vec<f32>>,
    dirty: bool,
}

impl EmbeddingCache {
    /// Create an empty cache for the given embedding model.
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            entries: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Load a cache from disk.
    ///
    /// An absent, unreadable, or malformed file yields an empty cache rather
    /// than an error. A file recorded under a different embedding model is
    /// discarded as stale.
    pub fn load(path: &Path, model: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No usable cache at {}: {}", path.display(), e);
                return Self::new(model);
            }
        };

        let file: CacheFile = match serde_json::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                warn!("Ignoring malformed cache file {}: {}", path.display(), e);
                return Self::new(model);
            }
        };

        if file.model != model {
            info!(
                "Cache was built with model '{}', active model is '{}'; rebuilding",
                file.model, model
            );
            return Self::new(model);
        }

        debug!(
            "Loaded {} cached embeddings from {}",
            file.entries.len(),
            path.display()
        );

        Self {
            model: model.to_string(),
            entries: file.entries,
            dirty: false,
        }
    }

    /// Look up the cached vector for a text.
    pub fn get(&self, text: &str) -> Option<&[f32]> {
        self.entries.get(text).map(Vec::as_slice)
    }

    /// Whether a vector is cached for this text.
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Insert a vector, marking the cache dirty.
    pub fn insert(&mut self, text: String, embedding: Vec<f32>) {
        self.entries.insert(text, embedding);
        self.dirty = true;
    }

    /// Return the cached vector for a text, generating and storing it when
    /// absent. The embedder is only called on a cache miss.
    pub async fn get_or_create(&mut self, text: &str, embedder: &dyn Embedder) -> Result<Vec<f32>> {
        if let Some(embedding) = self.entries.get(text) {
            return Ok(embedding.clone());
        }

        let embedding = embedder.embed(text).await?;
        self.insert(text.to_string(), embedding.clone());
        Ok(embedding)
    }

    /// Whether new records were created since the last flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of cached vectors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The embedding model this cache is bound to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Write the full mapping to disk, overwriting any previous file.
    ///
    /// Does nothing when no new records were created since the last flush.
    pub fn flush(&mut self, path: &Path) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = CacheFile {
            version: CACHE_VERSION,
            model: self.model.clone(),
            generated_at: Utc::now(),
            entries: self.entries.clone(),
        };

        let content = serde_json::to_string(&file)
            .map_err(|e| SvarError::Cache(format!("Failed to serialize cache: {}", e)))?;
        std::fs::write(path, content)?;

        info!(
            "Flushed {} embeddings to {}",
            self.entries.len(),
            path.display()
        );
        self.dirty = false;
        Ok(())
    }
}
