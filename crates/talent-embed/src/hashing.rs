//! Deterministic feature-hashing embedder.
//!
//! Each lower-cased token is hashed with SipHash-1-3 under fixed keys into one
//! of `dimensions` buckets, with the sign taken from the top hash bit. The
//! bag-of-words vector is then L2-normalised. Texts sharing vocabulary get a
//! high cosine similarity; no model download is needed.

use crate::error::Result;
use crate::provider::EmbeddingProvider;
use async_trait::async_trait;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

/// Fixed hash keys. Changing them changes every stored embedding.
const HASH_KEY_0: u64 = 0x7461_6c65_6e74_2d30;
const HASH_KEY_1: u64 = 0x6861_7368_696e_6731;

/// Feature-hashing embedding provider
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    /// Create an embedder producing `dimensions`-long vectors (at least 1)
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Embed synchronously
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in tokenize(text) {
            let hash = hash_token(&token);
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

/// Lower-case and split on anything that is not alphanumeric, `+` or `#`,
/// so `C++` and `C#` survive as tokens.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn hash_token(token: &str) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(HASH_KEY_0, HASH_KEY_1);
    token.hash(&mut hasher);
    hasher.finish()
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn model(&self) -> &str {
        "siphash13-bow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_normalized_and_sized() {
        let embedder = HashingEmbedder::new(64);
        let v = embedder.embed_text("Rust, SQL and distributed systems");
        assert_eq!(v.len(), 64);

        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn test_deterministic() {
        let a = HashingEmbedder::new(384).embed_text("Python Developer");
        let b = HashingEmbedder::new(384).embed_text("python developer");
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_vocabulary_scores_higher() {
        let embedder = HashingEmbedder::new(384);
        let candidate = embedder.embed_text("Skills: python, sql\nbackend developer using Python");
        let close = embedder.embed_text("Python Developer. Requirements: Python, SQL");
        let far = embedder.embed_text("Chef. Requirements: Cooking, Baking");

        assert!(cosine(&candidate, &close) > cosine(&candidate, &far));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let v = HashingEmbedder::new(16).embed_text("  ,; ");
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_tokenize_keeps_symbols() {
        let tokens: Vec<String> = tokenize("C++, C# and Go.").collect();
        assert_eq!(tokens, vec!["c++", "c#", "and", "go"]);
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let embedder = HashingEmbedder::new(32);
        let texts = vec!["alpha beta".to_string(), "gamma".to_string()];
        let batch = embedder.embed_batch(&texts).await.unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1], embedder.embed("gamma").await.unwrap());
    }
}
