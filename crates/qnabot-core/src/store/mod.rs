//! Storage contracts.
//!
//! The engine only talks to these traits. Backends:
//! - **Redis**: `qnabot-redis`
//! - **In-memory**: [`memory::InMemoryStore`], for tests and ephemeral runs

pub mod memory;

use async_trait::async_trait;

use crate::bot::Bot;
use crate::error::StoreError;
use crate::qna::{QnaFilter, QnaRecord};
use crate::search::ScoredRecord;
use crate::unresolved::{UnresolvedQuery, UnresolvedStatus};

pub use memory::InMemoryStore;

/// Vector record store for QnA pairs.
#[async_trait]
pub trait QnaStore: Send + Sync {
    /// Persist one record.
    async fn insert_qna(&self, record: &QnaRecord) -> Result<(), StoreError>;

    /// Persist all records or none of them.
    async fn insert_qna_batch(&self, records: &[QnaRecord]) -> Result<(), StoreError>;

    /// Fetch a record by id. `Ok(None)` if it doesn't exist.
    async fn get_qna(&self, id: &str) -> Result<Option<QnaRecord>, StoreError>;

    /// Overwrite an existing record. `StoreError::NotFound` if it doesn't exist.
    async fn update_qna(&self, record: &QnaRecord) -> Result<(), StoreError>;

    /// Remove a record. Returns whether it existed.
    async fn delete_qna(&self, id: &str) -> Result<bool, StoreError>;

    /// Records matching the filter, newest first.
    async fn list_qna(&self, filter: &QnaFilter) -> Result<Vec<QnaRecord>, StoreError>;

    /// Number of records, optionally scoped to a bot.
    async fn count_qna(&self, bot_id: Option<&str>) -> Result<usize, StoreError>;

    /// Nearest records by cosine distance, ascending.
    async fn find_by_vector_distance(
        &self,
        embedding: &[f32],
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError>;

    /// Records by cosine similarity, descending.
    async fn find_by_cosine_similarity(
        &self,
        embedding: &[f32],
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError>;

    /// Records by hybrid vector/lexical distance, ascending.
    async fn find_by_hybrid(
        &self,
        embedding: &[f32],
        query_text: &str,
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError>;

    /// Backend reachability.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Registry of configured bots.
#[async_trait]
pub trait BotRegistry: Send + Sync {
    async fn create_bot(&self, bot: &Bot) -> Result<(), StoreError>;

    async fn find_bot(&self, id: &str) -> Result<Option<Bot>, StoreError>;

    async fn list_bots(&self) -> Result<Vec<Bot>, StoreError>;
}

/// Log of questions that found no qualifying answer.
#[async_trait]
pub trait UnresolvedQueryLog: Send + Sync {
    async fn create_unresolved(&self, entry: &UnresolvedQuery) -> Result<(), StoreError>;

    async fn get_unresolved(&self, id: &str) -> Result<Option<UnresolvedQuery>, StoreError>;

    /// Entries newest first, optionally scoped to a bot.
    async fn list_unresolved(
        &self,
        bot_id: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<UnresolvedQuery>, StoreError>;

    /// Returns the updated entry, or `None` if it doesn't exist.
    async fn update_unresolved_status(
        &self,
        id: &str,
        status: UnresolvedStatus,
    ) -> Result<Option<UnresolvedQuery>, StoreError>;

    /// Returns whether the entry existed.
    async fn delete_unresolved(&self, id: &str) -> Result<bool, StoreError>;
}
