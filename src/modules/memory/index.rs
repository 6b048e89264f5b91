use async_trait::async_trait;
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::embedding::{cosine_similarity, HashingEmbedder};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Index lock poisoned")]
    Lock,

    #[error("Index backend error: {0}")]
    Backend(String),

    #[error("Index backend unreachable: {0}")]
    Unreachable(String),
}

/// One ranked retrieval match.
#[derive(Debug, Clone)]
pub struct IndexHit {
    pub text: String,
    pub metadata: Map<String, Value>,
    pub score: f32,
}

/// Derived, rebuildable similarity structure over stored text. The durable
/// log stays the source of truth; implementations may lose state as long as
/// they can be rebuilt from it.
#[async_trait]
pub trait SemanticIndex: Send + Sync {
    async fn add(&self, text: &str, metadata: &Map<String, Value>) -> Result<(), IndexError>;

    async fn search(&self, query: &str, k: usize) -> Result<Vec<IndexHit>, IndexError>;
}

struct StoredVector {
    text: String,
    metadata: Map<String, Value>,
    vector: Vec<f32>,
}

/// In-process index: hashed embeddings ranked by cosine similarity. Held in
/// memory only and rebuilt from the durable log on open.
pub struct LocalIndex {
    embedder: HashingEmbedder,
    entries: std::sync::RwLock<Vec<StoredVector>>,
}

impl LocalIndex {
    pub fn new(embedder: HashingEmbedder) -> Self {
        Self {
            embedder,
            entries: std::sync::RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SemanticIndex for LocalIndex {
    async fn add(&self, text: &str, metadata: &Map<String, Value>) -> Result<(), IndexError> {
        let vector = self.embedder.embed(text);
        let mut entries = self.entries.write().map_err(|_| IndexError::Lock)?;
        entries.push(StoredVector {
            text: text.to_string(),
            metadata: metadata.clone(),
            vector,
        });
        Ok(())
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<IndexHit>, IndexError> {
        let query_vector = self.embedder.embed(query);
        let entries = self.entries.read().map_err(|_| IndexError::Lock)?;

        let mut hits: Vec<IndexHit> = entries
            .iter()
            .map(|entry| IndexHit {
                text: entry.text.clone(),
                metadata: entry.metadata.clone(),
                score: cosine_similarity(&query_vector, &entry.vector),
            })
            .filter(|hit| hit.score > 0.0)
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}

/// Qdrant-compatible REST backend. Construction probes the collection and
/// fails hard when the backend is unreachable; there is no silent fallback
/// for a misconfigured remote store.
pub struct RemoteIndex {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
    embedder: HashingEmbedder,
}

impl RemoteIndex {
    pub const COLLECTION: &'static str = "companion_memory";

    pub async fn connect(
        base_url: &str,
        api_key: &str,
        embedder: HashingEmbedder,
    ) -> Result<Self, IndexError> {
        let index = Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: Self::COLLECTION.to_string(),
            api_key: if api_key.is_empty() {
                None
            } else {
                Some(api_key.to_string())
            },
            embedder,
        };
        index.ensure_collection().await?;
        Ok(index)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.header("api-key", key);
        }
        builder
    }

    async fn ensure_collection(&self) -> Result<(), IndexError> {
        let path = format!("/collections/{}", self.collection);
        let response = self
            .request(reqwest::Method::GET, &path)
            .send()
            .await
            .map_err(|e| IndexError::Unreachable(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let body = json!({
            "vectors": { "size": self.embedder.dim(), "distance": "Cosine" }
        });
        let created = self
            .request(reqwest::Method::PUT, &path)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Unreachable(e.to_string()))?;
        if !created.status().is_success() {
            return Err(IndexError::Backend(format!(
                "failed to create collection {}: {}",
                self.collection,
                created.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SemanticIndex for RemoteIndex {
    async fn add(&self, text: &str, metadata: &Map<String, Value>) -> Result<(), IndexError> {
        let body = json!({
            "points": [{
                "id": uuid::Uuid::new_v4().to_string(),
                "vector": self.embedder.embed(text),
                "payload": { "text": text, "metadata": metadata }
            }]
        });
        let path = format!("/collections/{}/points?wait=true", self.collection);
        let response = self
            .request(reqwest::Method::PUT, &path)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Backend(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IndexError::Backend(format!(
                "point upsert failed: {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<IndexHit>, IndexError> {
        let body = json!({
            "vector": self.embedder.embed(query),
            "limit": k,
            "with_payload": true
        });
        let path = format!("/collections/{}/points/search", self.collection);
        let response = self
            .request(reqwest::Method::POST, &path)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Backend(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IndexError::Backend(format!(
                "search failed: {}",
                response.status()
            )));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| IndexError::Backend(e.to_string()))?;
        let hits = parsed
            .get("result")
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .filter_map(|item| {
                        let score = item.get("score")?.as_f64()? as f32;
                        let payload = item.get("payload")?;
                        let text = payload.get("text")?.as_str()?.to_string();
                        let metadata = payload
                            .get("metadata")
                            .and_then(Value::as_object)
                            .cloned()
                            .unwrap_or_default();
                        Some(IndexHit {
                            text,
                            metadata,
                            score,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(hits)
    }
}
