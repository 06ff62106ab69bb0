//! Search request and per-call candidate types.

use serde::{Deserialize, Serialize};

use crate::qna::QnaRecord;

/// Default number of candidates per strategy.
pub const DEFAULT_LIMIT: usize = 5;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// A text query scoped to an optional bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(alias = "question")]
    pub query: String,
    #[serde(default)]
    pub bot_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl SearchRequest {
    pub fn new(query: &str, bot_id: Option<&str>, limit: usize) -> Self {
        Self {
            query: query.to_string(),
            bot_id: bot_id.map(str::to_string),
            limit,
        }
    }

    pub fn bot_id(&self) -> Option<&str> {
        self.bot_id.as_deref()
    }
}

/// A raw-embedding query across all bots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingSearchRequest {
    pub embedding: Vec<f32>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// A record paired with the metric of the strategy that produced it.
///
/// For distance strategies lower is better; for similarity strategies higher is better.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: QnaRecord,
    pub score: f64,
}

/// One candidate of one search call. Never persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScore {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(rename = "botId")]
    pub bot_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosine_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosine_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hybrid_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_score: Option<f64>,
}

impl CandidateScore {
    /// A candidate carrying only record fields.
    pub fn from_record(record: QnaRecord) -> Self {
        Self {
            id: record.id,
            question: record.question,
            answer: record.answer,
            bot_id: record.bot_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            vector_distance: None,
            cosine_similarity: None,
            hybrid_distance: None,
            cosine_score: None,
            hybrid_score: None,
            combined_score: None,
        }
    }

    pub fn with_vector_distance(scored: ScoredRecord) -> Self {
        let mut c = Self::from_record(scored.record);
        c.vector_distance = Some(scored.score);
        c
    }

    pub fn with_cosine_similarity(scored: ScoredRecord) -> Self {
        let mut c = Self::from_record(scored.record);
        c.cosine_similarity = Some(scored.score);
        c
    }

    pub fn with_hybrid_distance(scored: ScoredRecord) -> Self {
        let mut c = Self::from_record(scored.record);
        c.hybrid_distance = Some(scored.score);
        c
    }
}
