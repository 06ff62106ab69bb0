//! Centralized error types for QnABot.

use thiserror::Error;

/// Main error type for QnABot operations.
#[derive(Error, Debug)]
pub enum QnaError {
    #[error("Invalid bot id: {0}")]
    InvalidBotId(String),

    #[error("Invalid QnA id: {0}")]
    InvalidQnaId(String),

    #[error("Invalid unresolved query id: {0}")]
    InvalidUnresolvedQueryId(String),

    #[error("Could not create QnA: {0}")]
    Creation(String),

    #[error("Could not update QnA: {0}")]
    Update(String),

    #[error("Could not delete QnA: {0}")]
    Deletion(String),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for QnABot operations.
pub type QnaResult<T> = Result<T, QnaError>;

impl QnaError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error refers to an entity that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::InvalidBotId(_) | Self::InvalidQnaId(_) | Self::InvalidUnresolvedQueryId(_)
        )
    }
}

/// Failures reported by an embedding provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("Text content cannot be empty")]
    EmptyInput,

    #[error("Embedding provider unreachable: {0}")]
    Transport(String),

    #[error("Embedding provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// Failures reported by a record store backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
