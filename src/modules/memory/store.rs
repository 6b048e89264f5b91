//! Dual memory: an append-only JSON log on disk (source of truth) plus an
//! optional semantic index (derived accelerator).

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::embedding::HashingEmbedder;
use super::index::{IndexError, LocalIndex, RemoteIndex, SemanticIndex};
use crate::config::{Settings, VectorStoreKind};

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Memory log IO error: {0}")]
    Io(String),

    #[error("Memory log is corrupt: {0}")]
    Corrupt(String),

    #[error("Memory log lock poisoned")]
    Lock,

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("Unsupported embedding model identifier: {0}")]
    UnsupportedEmbedding(String),
}

/// One durable-log record. Immutable once written; the conversational role
/// travels in `metadata` under the `"role"` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub text: String,
    pub metadata: Map<String, Value>,
    pub timestamp: String,
}

impl MemoryRecord {
    pub fn role(&self) -> Option<&str> {
        self.metadata.get("role").and_then(Value::as_str)
    }
}

pub use super::index::IndexHit as MemoryHit;

pub struct MemoryStore {
    memory_file: PathBuf,
    max_entries: usize,
    log_lock: Mutex<()>,
    index: Option<Box<dyn SemanticIndex>>,
}

impl MemoryStore {
    /// Opens the durable log (creating an empty one if needed) and builds the
    /// configured index. A `disabled` index always succeeds; an unreachable
    /// `remote` backend is a fatal construction error; a `local` index is
    /// rebuilt from the log since it is a derived structure.
    pub async fn open(settings: &Settings) -> Result<Self, MemoryError> {
        if let Some(parent) = settings.memory_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MemoryError::Io(e.to_string()))?;
        }
        if !settings.memory_file.exists() {
            std::fs::write(&settings.memory_file, "[]")
                .map_err(|e| MemoryError::Io(e.to_string()))?;
            tracing::info!(file = %settings.memory_file.display(), "created new memory log");
        }

        let mut store = Self {
            memory_file: settings.memory_file.clone(),
            max_entries: settings.max_memory_entries,
            log_lock: Mutex::new(()),
            index: None,
        };

        store.index = match settings.vector_store {
            VectorStoreKind::Disabled => {
                tracing::info!("semantic index disabled");
                None
            }
            VectorStoreKind::Local => {
                let embedder = Self::embedder(settings)?;
                let local = LocalIndex::new(embedder);
                let records = store.all()?;
                for record in &records {
                    local.add(&record.text, &record.metadata).await?;
                }
                tracing::info!(rebuilt = records.len(), "local semantic index ready");
                Some(Box::new(local))
            }
            VectorStoreKind::Remote => {
                let embedder = Self::embedder(settings)?;
                let remote =
                    RemoteIndex::connect(&settings.qdrant_url, &settings.qdrant_api_key, embedder)
                        .await?;
                tracing::info!(url = %settings.qdrant_url, "remote semantic index ready");
                Some(Box::new(remote))
            }
        };

        Ok(store)
    }

    fn embedder(settings: &Settings) -> Result<HashingEmbedder, MemoryError> {
        HashingEmbedder::from_identifier(&settings.embedding_model)
            .ok_or_else(|| MemoryError::UnsupportedEmbedding(settings.embedding_model.clone()))
    }

    fn load_log(&self) -> Result<Vec<MemoryRecord>, MemoryError> {
        let raw = std::fs::read_to_string(&self.memory_file)
            .map_err(|e| MemoryError::Io(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| MemoryError::Corrupt(e.to_string()))
    }

    fn save_log(&self, records: &[MemoryRecord]) -> Result<(), MemoryError> {
        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| MemoryError::Corrupt(e.to_string()))?;
        std::fs::write(&self.memory_file, raw).map_err(|e| MemoryError::Io(e.to_string()))
    }

    /// Appends one record. The log write happens before the index write and
    /// is serialized against other writers; an index failure is reported but
    /// the log entry stands, since the index can be rebuilt from the log.
    pub async fn append(
        &self,
        text: &str,
        metadata: Map<String, Value>,
    ) -> Result<(), MemoryError> {
        let record = MemoryRecord {
            text: text.to_string(),
            metadata,
            timestamp: Utc::now().to_rfc3339(),
        };

        {
            let _guard = self.log_lock.lock().map_err(|_| MemoryError::Lock)?;
            let mut records = self.load_log()?;
            records.push(record.clone());
            self.save_log(&records)?;
        }
        tracing::debug!(chars = record.text.len(), "memory entry appended to log");

        if let Some(index) = &self.index {
            index.add(&record.text, &record.metadata).await?;
        }
        Ok(())
    }

    /// Best-effort semantic retrieval. No index means an empty result (a
    /// valid outcome, not an error); a failing search is logged and likewise
    /// converted to an empty result, never propagated.
    pub async fn retrieve(&self, query: &str, limit: Option<usize>) -> Vec<MemoryHit> {
        let index = match &self.index {
            Some(index) => index,
            None => return Vec::new(),
        };
        let k = limit.unwrap_or(self.max_entries);
        match index.search(query, k).await {
            Ok(hits) => {
                tracing::debug!(query_chars = query.len(), hits = hits.len(), "memory search");
                hits
            }
            Err(e) => {
                tracing::warn!(error = %e, "memory search failed; returning no context");
                Vec::new()
            }
        }
    }

    /// Full durable log, in insertion order.
    pub fn all(&self) -> Result<Vec<MemoryRecord>, MemoryError> {
        let _guard = self.log_lock.lock().map_err(|_| MemoryError::Lock)?;
        self.load_log()
    }

    pub fn count(&self) -> Result<usize, MemoryError> {
        Ok(self.all()?.len())
    }
}
