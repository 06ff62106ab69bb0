//! Question/answer domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored question/answer pair with the embedding of its question.
///
/// The embedding never leaves the process through serialization; stores keep
/// their own row types that carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QnaRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub bot_id: String,
    #[serde(skip_serializing, default)]
    pub embedding: Vec<f32>,
    pub created_at: String,
    pub updated_at: String,
}

impl QnaRecord {
    /// Build a fresh record with a new id and current timestamps.
    pub fn new(question: &str, answer: &str, bot_id: &str, embedding: Vec<f32>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            bot_id: bot_id.to_string(),
            embedding,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether the record matches a case-insensitive text filter.
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.question.to_lowercase().contains(needle_lower)
            || self.answer.to_lowercase().contains(needle_lower)
    }
}

/// Input for creating a single pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQna {
    pub question: String,
    pub answer: String,
    pub bot_id: String,
}

impl NewQna {
    pub fn new(question: &str, answer: &str, bot_id: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            bot_id: bot_id.to_string(),
        }
    }
}

/// Partial update. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QnaUpdate {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl QnaUpdate {
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none()
    }
}

/// Largest page any listing returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// Listing filter with plain offset/limit paging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QnaFilter {
    pub bot_id: Option<String>,
    pub q: Option<String>,
    pub offset: usize,
    pub limit: usize,
}

impl Default for QnaFilter {
    fn default() -> Self {
        Self {
            bot_id: None,
            q: None,
            offset: 0,
            limit: 20,
        }
    }
}

impl QnaFilter {
    /// `limit` capped at [`MAX_PAGE_SIZE`].
    pub fn page_limit(&self) -> usize {
        self.limit.min(MAX_PAGE_SIZE)
    }

    /// Lower-cased text needle, ignoring blank queries.
    pub fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// Outcome of a committed batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub success: bool,
    pub count: usize,
    pub vectors: Vec<QnaRecord>,
}
