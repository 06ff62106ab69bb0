//! Unresolved query models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user question the bot could not answer, kept for human triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedQuery {
    pub id: String,
    pub bot_id: String,
    pub conversation_id: String,
    pub query: String,
    pub status: UnresolvedStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl UnresolvedQuery {
    /// A new pending entry.
    pub fn pending(bot_id: &str, conversation_id: &str, query: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            bot_id: bot_id.to_string(),
            conversation_id: conversation_id.to_string(),
            query: query.to_string(),
            status: UnresolvedStatus::Pending,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Triage status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedStatus {
    #[default]
    Pending,
    Skipped,
    Resolved,
}

impl UnresolvedStatus {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "skipped" => Some(Self::Skipped),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Skipped => "skipped",
            Self::Resolved => "resolved",
        }
    }
}
