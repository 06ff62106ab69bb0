//! Embedding provider contract.

use async_trait::async_trait;

use crate::error::EmbeddingError;

/// Text embedding plus the two generative helpers used around retrieval.
///
/// `paraphrase` and `reword_answer` are optional enrichments: callers must
/// degrade to "no paraphrases" and "original answer" on `Err`.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a text. Empty or whitespace-only text is rejected.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Alternate phrasings of a question. Malformed model output yields an empty list.
    async fn paraphrase(&self, question: &str) -> Result<Vec<String>, EmbeddingError>;

    /// Conversational rewrite of a stored answer.
    async fn reword_answer(&self, question: &str, answer: &str) -> Result<String, EmbeddingError>;

    /// Whether the provider is reachable and ready.
    async fn health_check(&self) -> bool {
        true
    }
}
