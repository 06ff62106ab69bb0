//! Retrieval engine: the individual similarity strategies and the ensemble.
//!
//! Every strategy is read-only. A query is embedded once per call; scores are
//! computed fresh and never cached.

use std::sync::Arc;

use qnabot_core::search::{CandidateScore, EmbeddingSearchRequest, SearchRequest};
use qnabot_core::{EmbeddingProvider, QnaError, QnaResult, QnaStore};
use tracing::debug;

use crate::ensemble::{self, ENSEMBLE_STRATEGY_LIMIT};

/// Runs similarity searches against a store.
#[derive(Clone)]
pub struct RetrievalEngine {
    store: Arc<dyn QnaStore>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl RetrievalEngine {
    pub fn new(store: Arc<dyn QnaStore>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, provider }
    }

    async fn embed_query(&self, query: &str) -> QnaResult<Vec<f32>> {
        let embedding = self.provider.embed(query).await?;
        debug!(dim = embedding.len(), "Embedded query");
        Ok(embedding)
    }

    /// Nearest records by cosine distance, ascending.
    pub async fn search_by_vector(&self, req: &SearchRequest) -> QnaResult<Vec<CandidateScore>> {
        let embedding = self.embed_query(&req.query).await?;
        let hits = self
            .store
            .find_by_vector_distance(&embedding, req.bot_id(), req.limit)
            .await?;
        debug!(count = hits.len(), "Vector search");
        Ok(hits.into_iter().map(CandidateScore::with_vector_distance).collect())
    }

    /// Records by cosine similarity, descending.
    pub async fn search_by_cosine(&self, req: &SearchRequest) -> QnaResult<Vec<CandidateScore>> {
        let embedding = self.embed_query(&req.query).await?;
        let hits = self
            .store
            .find_by_cosine_similarity(&embedding, req.bot_id(), req.limit)
            .await?;
        debug!(count = hits.len(), "Cosine search");
        Ok(hits.into_iter().map(CandidateScore::with_cosine_similarity).collect())
    }

    /// Records by blended vector and trigram distance, ascending.
    pub async fn search_by_hybrid(&self, req: &SearchRequest) -> QnaResult<Vec<CandidateScore>> {
        let embedding = self.embed_query(&req.query).await?;
        let hits = self
            .store
            .find_by_hybrid(&embedding, &req.query, req.bot_id(), req.limit)
            .await?;
        debug!(count = hits.len(), "Hybrid search");
        Ok(hits.into_iter().map(CandidateScore::with_hybrid_distance).collect())
    }

    /// Cosine and hybrid search merged, thresholded and sorted by combined score.
    ///
    /// An empty result means nothing qualified; it is not an error.
    pub async fn search_ensemble(&self, req: &SearchRequest) -> QnaResult<Vec<CandidateScore>> {
        let embedding = self.embed_query(&req.query).await?;
        let (cosine, hybrid) = tokio::try_join!(
            self.store
                .find_by_cosine_similarity(&embedding, req.bot_id(), ENSEMBLE_STRATEGY_LIMIT),
            self.store.find_by_hybrid(
                &embedding,
                &req.query,
                req.bot_id(),
                ENSEMBLE_STRATEGY_LIMIT
            ),
        )?;
        let (n_cosine, n_hybrid) = (cosine.len(), hybrid.len());

        let ranked = ensemble::rank(cosine, hybrid, req.limit);
        debug!(
            cosine = n_cosine,
            hybrid = n_hybrid,
            kept = ranked.len(),
            "Ensemble search"
        );
        Ok(ranked)
    }

    /// Nearest records to a raw embedding across all bots.
    pub async fn search_by_embedding(
        &self,
        req: &EmbeddingSearchRequest,
    ) -> QnaResult<Vec<CandidateScore>> {
        check_embedding(req)?;
        let hits = self
            .store
            .find_by_vector_distance(&req.embedding, None, req.limit)
            .await?;
        Ok(hits.into_iter().map(CandidateScore::with_vector_distance).collect())
    }

    /// Records by cosine similarity to a raw embedding across all bots.
    pub async fn search_cosine_by_embedding(
        &self,
        req: &EmbeddingSearchRequest,
    ) -> QnaResult<Vec<CandidateScore>> {
        check_embedding(req)?;
        let hits = self
            .store
            .find_by_cosine_similarity(&req.embedding, None, req.limit)
            .await?;
        Ok(hits.into_iter().map(CandidateScore::with_cosine_similarity).collect())
    }
}

fn check_embedding(req: &EmbeddingSearchRequest) -> QnaResult<()> {
    if req.embedding.is_empty() {
        return Err(QnaError::validation("embedding must not be empty"));
    }
    Ok(())
}
