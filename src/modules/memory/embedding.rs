use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const DEFAULT_MODEL: &str = "feature-hash-256";

const MIN_DIM: usize = 16;
const MAX_DIM: usize = 4096;

/// Parses an embedding identifier of the form `feature-hash-<dim>`. Returns
/// the dimensionality, or `None` for anything unsupported.
pub fn parse_identifier(identifier: &str) -> Option<usize> {
    let dim: usize = identifier.strip_prefix("feature-hash-")?.parse().ok()?;
    if (MIN_DIM..=MAX_DIM).contains(&dim) {
        Some(dim)
    } else {
        None
    }
}

/// Deterministic feature-hashing embedder: each token is hashed into one of
/// `dim` buckets with a hash-derived sign, then the vector is L2-normalised.
/// The same text always maps to the same vector, with no model files and no
/// network.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        parse_identifier(identifier).map(|dim| Self { dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let bucket = (h % self.dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::{cosine_similarity, parse_identifier, HashingEmbedder};

    #[test]
    fn test_parse_identifier() {
        assert_eq!(parse_identifier("feature-hash-256"), Some(256));
        assert_eq!(parse_identifier("feature-hash-64"), Some(64));
        assert_eq!(parse_identifier("feature-hash-8"), None);
        assert_eq!(parse_identifier("sentence-transformers/all-MiniLM-L6-v2"), None);
    }

    #[test]
    fn test_embed_deterministic() {
        let embedder = HashingEmbedder::from_identifier("feature-hash-256").unwrap();
        assert_eq!(embedder.embed("hello world"), embedder.embed("hello world"));
    }

    #[test]
    fn test_similar_texts_score_higher() {
        let embedder = HashingEmbedder::from_identifier("feature-hash-256").unwrap();
        let query = embedder.embed("the cat sat on the mat");
        let close = embedder.embed("a cat on a mat");
        let far = embedder.embed("quarterly revenue projections");
        assert!(cosine_similarity(&query, &close) > cosine_similarity(&query, &far));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::from_identifier("feature-hash-64").unwrap();
        let vector = embedder.embed("");
        assert!(vector.iter().all(|v| *v == 0.0));
        assert_eq!(cosine_similarity(&vector, &vector), 0.0);
    }
}
