//! Bot domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A configured chatbot that owns a bank of QnA records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub fallback_message: Option<String>,
    #[serde(default)]
    pub handover_to_human: bool,
    pub handover_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for registering a bot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBot {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fallback_message: Option<String>,
    #[serde(default)]
    pub handover_to_human: bool,
    #[serde(default)]
    pub handover_message: Option<String>,
}

impl Bot {
    /// Build a bot with a fresh id. An explicit id may be supplied for imports.
    pub fn from_new(new: NewBot, id: Option<&str>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id
                .map(str::to_string)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new.name,
            description: new.description,
            fallback_message: new.fallback_message,
            handover_to_human: new.handover_to_human,
            handover_message: new.handover_message,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
