//! QnABot Core Library
//!
//! Domain models, storage contracts and similarity scoring for the
//! chatbot-builder backend.

pub mod bot;
pub mod config;
pub mod error;
pub mod provider;
pub mod qna;
pub mod search;
pub mod store;
pub mod unresolved;

pub use config::Settings;
pub use error::{EmbeddingError, QnaError, QnaResult, StoreError};
pub use provider::EmbeddingProvider;
pub use store::{BotRegistry, QnaStore, UnresolvedQueryLog};
