//! In-memory store for testing.
//!
//! Stores everything in lock-guarded vectors in insertion order and persists
//! nothing. Ranking goes through [`crate::search::rank`], the same code the
//! Redis backend uses.

use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{BotRegistry, QnaStore, UnresolvedQueryLog};
use crate::bot::Bot;
use crate::error::StoreError;
use crate::qna::{QnaFilter, QnaRecord, MAX_PAGE_SIZE};
use crate::search::rank;
use crate::search::ScoredRecord;
use crate::unresolved::{UnresolvedQuery, UnresolvedStatus};

/// Process-local implementation of every store contract.
#[derive(Default)]
pub struct InMemoryStore {
    qna: RwLock<Vec<QnaRecord>>,
    bots: RwLock<Vec<Bot>>,
    unresolved: RwLock<Vec<UnresolvedQuery>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn scoped(&self, bot_id: Option<&str>) -> Result<Vec<QnaRecord>, StoreError> {
        Ok(read(&self.qna)?
            .iter()
            .filter(|r| rank::in_scope(r, bot_id))
            .cloned()
            .collect())
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read()
        .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write()
        .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))
}

#[async_trait]
impl QnaStore for InMemoryStore {
    async fn insert_qna(&self, record: &QnaRecord) -> Result<(), StoreError> {
        write(&self.qna)?.push(record.clone());
        Ok(())
    }

    async fn insert_qna_batch(&self, records: &[QnaRecord]) -> Result<(), StoreError> {
        // A single write guard makes the batch visible all at once.
        write(&self.qna)?.extend(records.iter().cloned());
        Ok(())
    }

    async fn get_qna(&self, id: &str) -> Result<Option<QnaRecord>, StoreError> {
        Ok(read(&self.qna)?.iter().find(|r| r.id == id).cloned())
    }

    async fn update_qna(&self, record: &QnaRecord) -> Result<(), StoreError> {
        let mut qna = write(&self.qna)?;
        let slot = qna
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
        *slot = record.clone();
        Ok(())
    }

    async fn delete_qna(&self, id: &str) -> Result<bool, StoreError> {
        let mut qna = write(&self.qna)?;
        let before = qna.len();
        qna.retain(|r| r.id != id);
        Ok(qna.len() != before)
    }

    async fn list_qna(&self, filter: &QnaFilter) -> Result<Vec<QnaRecord>, StoreError> {
        let needle = filter.needle();
        Ok(read(&self.qna)?
            .iter()
            .rev()
            .filter(|r| rank::in_scope(r, filter.bot_id.as_deref()))
            .filter(|r| needle.as_deref().map(|n| r.matches_text(n)).unwrap_or(true))
            .skip(filter.offset)
            .take(filter.page_limit())
            .cloned()
            .collect())
    }

    async fn count_qna(&self, bot_id: Option<&str>) -> Result<usize, StoreError> {
        Ok(read(&self.qna)?
            .iter()
            .filter(|r| rank::in_scope(r, bot_id))
            .count())
    }

    async fn find_by_vector_distance(
        &self,
        embedding: &[f32],
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        Ok(rank::by_vector_distance(self.scoped(bot_id)?, embedding, limit))
    }

    async fn find_by_cosine_similarity(
        &self,
        embedding: &[f32],
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        Ok(rank::by_cosine_similarity(self.scoped(bot_id)?, embedding, limit))
    }

    async fn find_by_hybrid(
        &self,
        embedding: &[f32],
        query_text: &str,
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        Ok(rank::by_hybrid(self.scoped(bot_id)?, embedding, query_text, limit))
    }
}

#[async_trait]
impl BotRegistry for InMemoryStore {
    async fn create_bot(&self, bot: &Bot) -> Result<(), StoreError> {
        write(&self.bots)?.push(bot.clone());
        Ok(())
    }

    async fn find_bot(&self, id: &str) -> Result<Option<Bot>, StoreError> {
        Ok(read(&self.bots)?.iter().find(|b| b.id == id).cloned())
    }

    async fn list_bots(&self) -> Result<Vec<Bot>, StoreError> {
        Ok(read(&self.bots)?.clone())
    }
}

#[async_trait]
impl UnresolvedQueryLog for InMemoryStore {
    async fn create_unresolved(&self, entry: &UnresolvedQuery) -> Result<(), StoreError> {
        write(&self.unresolved)?.push(entry.clone());
        Ok(())
    }

    async fn get_unresolved(&self, id: &str) -> Result<Option<UnresolvedQuery>, StoreError> {
        Ok(read(&self.unresolved)?.iter().find(|q| q.id == id).cloned())
    }

    async fn list_unresolved(
        &self,
        bot_id: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<UnresolvedQuery>, StoreError> {
        Ok(read(&self.unresolved)?
            .iter()
            .rev()
            .filter(|q| bot_id.map(|b| q.bot_id == b).unwrap_or(true))
            .skip(offset)
            .take(limit.min(MAX_PAGE_SIZE))
            .cloned()
            .collect())
    }

    async fn update_unresolved_status(
        &self,
        id: &str,
        status: UnresolvedStatus,
    ) -> Result<Option<UnresolvedQuery>, StoreError> {
        let mut entries = write(&self.unresolved)?;
        Ok(entries.iter_mut().find(|q| q.id == id).map(|q| {
            q.status = status;
            q.updated_at = chrono::Utc::now().to_rfc3339();
            q.clone()
        }))
    }

    async fn delete_unresolved(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = write(&self.unresolved)?;
        let before = entries.len();
        entries.retain(|q| q.id != id);
        Ok(entries.len() != before)
    }
}
