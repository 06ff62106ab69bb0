//! Deterministic offline embedder.
//!
//! Hashes lower-cased alphanumeric tokens (FNV-1a) into a fixed number of
//! buckets and L2-normalizes the counts. Texts sharing words land close in
//! cosine space, which is enough for development without a model server.

use async_trait::async_trait;
use qnabot_core::{EmbeddingError, EmbeddingProvider};

use crate::ollama::EMBEDDING_DIM;

#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(8) }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dim];

        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut h: u64 = 0xcbf29ce484222325;
            for b in token.as_bytes() {
                h ^= *b as u64;
                h = h.wrapping_mul(0x100000001b3);
            }
            v[(h % self.dim as u64) as usize] += 1.0;
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(EMBEDDING_DIM)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        Ok(self.vectorize(text))
    }

    async fn paraphrase(&self, _question: &str) -> Result<Vec<String>, EmbeddingError> {
        Ok(Vec::new())
    }

    async fn reword_answer(&self, _question: &str, answer: &str) -> Result<String, EmbeddingError> {
        Ok(answer.to_string())
    }
}
