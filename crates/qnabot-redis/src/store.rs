//! [`RedisStore`]: the store contracts over a Redis connection pool.
//!
//! Redis has no vector index here, so similarity searches load the bot-scoped
//! records and rank them with `qnabot_core::search::rank`.

use async_trait::async_trait;
use qnabot_core::bot::Bot;
use qnabot_core::qna::{QnaFilter, QnaRecord};
use qnabot_core::search::{rank, ScoredRecord};
use qnabot_core::unresolved::{UnresolvedQuery, UnresolvedStatus};
use qnabot_core::{BotRegistry, QnaStore, StoreError, UnresolvedQueryLog};
use tracing::debug;

use crate::client::{self, init_pool, RedisPool, RedisResult};
use crate::queries::{bots, qna, unresolved};

/// Redis-backed implementation of every store contract.
#[derive(Clone)]
pub struct RedisStore {
    pool: RedisPool,
}

impl RedisStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Connect to `redis_url`.
    pub async fn connect(redis_url: &str) -> RedisResult<Self> {
        Ok(Self::new(init_pool(redis_url).await?))
    }

    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }

    async fn scoped(&self, bot_id: Option<&str>) -> Result<Vec<QnaRecord>, StoreError> {
        let records = qna::list_scope(&self.pool, bot_id).await?;
        debug!(count = records.len(), bot_id = ?bot_id, "Loaded records for ranking");
        Ok(records)
    }
}

#[async_trait]
impl QnaStore for RedisStore {
    async fn insert_qna(&self, record: &QnaRecord) -> Result<(), StoreError> {
        Ok(qna::create_qna(&self.pool, record).await?)
    }

    async fn insert_qna_batch(&self, records: &[QnaRecord]) -> Result<(), StoreError> {
        Ok(qna::create_qna_batch(&self.pool, records).await?)
    }

    async fn get_qna(&self, id: &str) -> Result<Option<QnaRecord>, StoreError> {
        Ok(qna::get_qna(&self.pool, id).await?)
    }

    async fn update_qna(&self, record: &QnaRecord) -> Result<(), StoreError> {
        Ok(qna::update_qna(&self.pool, record).await?)
    }

    async fn delete_qna(&self, id: &str) -> Result<bool, StoreError> {
        Ok(qna::delete_qna(&self.pool, id).await?)
    }

    async fn list_qna(&self, filter: &QnaFilter) -> Result<Vec<QnaRecord>, StoreError> {
        Ok(qna::list_qna(&self.pool, filter).await?)
    }

    async fn count_qna(&self, bot_id: Option<&str>) -> Result<usize, StoreError> {
        Ok(qna::count_qna(&self.pool, bot_id).await?)
    }

    async fn find_by_vector_distance(
        &self,
        embedding: &[f32],
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        let records = self.scoped(bot_id).await?;
        Ok(rank::by_vector_distance(records, embedding, limit))
    }

    async fn find_by_cosine_similarity(
        &self,
        embedding: &[f32],
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        let records = self.scoped(bot_id).await?;
        Ok(rank::by_cosine_similarity(records, embedding, limit))
    }

    async fn find_by_hybrid(
        &self,
        embedding: &[f32],
        query_text: &str,
        bot_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ScoredRecord>, StoreError> {
        let records = self.scoped(bot_id).await?;
        Ok(rank::by_hybrid(records, embedding, query_text, limit))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(client::ping(&self.pool).await?)
    }
}

#[async_trait]
impl BotRegistry for RedisStore {
    async fn create_bot(&self, bot: &Bot) -> Result<(), StoreError> {
        Ok(bots::create_bot(&self.pool, bot).await?)
    }

    async fn find_bot(&self, id: &str) -> Result<Option<Bot>, StoreError> {
        Ok(bots::get_bot(&self.pool, id).await?)
    }

    async fn list_bots(&self) -> Result<Vec<Bot>, StoreError> {
        Ok(bots::list_bots(&self.pool).await?)
    }
}

#[async_trait]
impl UnresolvedQueryLog for RedisStore {
    async fn create_unresolved(&self, entry: &UnresolvedQuery) -> Result<(), StoreError> {
        Ok(unresolved::create_unresolved(&self.pool, entry).await?)
    }

    async fn get_unresolved(&self, id: &str) -> Result<Option<UnresolvedQuery>, StoreError> {
        Ok(unresolved::get_unresolved(&self.pool, id).await?)
    }

    async fn list_unresolved(
        &self,
        bot_id: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<UnresolvedQuery>, StoreError> {
        Ok(unresolved::list_unresolved(&self.pool, bot_id, offset, limit).await?)
    }

    async fn update_unresolved_status(
        &self,
        id: &str,
        status: UnresolvedStatus,
    ) -> Result<Option<UnresolvedQuery>, StoreError> {
        Ok(unresolved::update_unresolved_status(&self.pool, id, status).await?)
    }

    async fn delete_unresolved(&self, id: &str) -> Result<bool, StoreError> {
        Ok(unresolved::delete_unresolved(&self.pool, id).await?)
    }
}
