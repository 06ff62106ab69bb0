//! Ingestion pipeline.
//!
//! Embeds and persists QnA pairs. Single inserts fan out into paraphrase
//! records on a best-effort basis; batches are all-or-nothing and never
//! paraphrased.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use qnabot_core::qna::{self, BatchResult, NewQna, QnaFilter, QnaRecord, QnaUpdate};
use qnabot_core::{BotRegistry, EmbeddingProvider, QnaError, QnaResult, QnaStore, StoreError};
use tracing::{debug, info, warn};

/// Pipeline for adding, editing and removing QnA records.
#[derive(Clone)]
pub struct IngestionPipeline {
    store: Arc<dyn QnaStore>,
    bots: Arc<dyn BotRegistry>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl IngestionPipeline {
    pub fn new(
        store: Arc<dyn QnaStore>,
        bots: Arc<dyn BotRegistry>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            store,
            bots,
            provider,
        }
    }

    async fn ensure_bot(&self, bot_id: &str) -> QnaResult<()> {
        match self.bots.find_bot(bot_id).await? {
            Some(_) => Ok(()),
            None => Err(QnaError::InvalidBotId(bot_id.to_string())),
        }
    }

    /// Add a pair, then one record per paraphrase of its question.
    ///
    /// Only the primary record is required; paraphrase failures are logged.
    pub async fn create_qna(&self, new: NewQna) -> QnaResult<QnaRecord> {
        qna::validate_new(&new)?;
        self.ensure_bot(&new.bot_id).await?;

        let embedding = self.provider.embed(&new.question).await?;
        let record = QnaRecord::new(&new.question, &new.answer, &new.bot_id, embedding);
        self.store
            .insert_qna(&record)
            .await
            .map_err(|e| QnaError::Creation(e.to_string()))?;
        info!(id = %record.id, bot_id = %record.bot_id, "QnA created");

        self.add_paraphrases(&record).await;
        Ok(record)
    }

    async fn add_paraphrases(&self, source: &QnaRecord) {
        let paraphrases = match self.provider.paraphrase(&source.question).await {
            Ok(p) => p,
            Err(e) => {
                warn!(id = %source.id, error = %e, "Paraphrase generation failed");
                return;
            }
        };
        if paraphrases.is_empty() {
            return;
        }

        let tasks = paraphrases
            .iter()
            .map(|question| self.insert_paraphrase(question, source));
        let results = join_all(tasks).await;

        let stored = results.iter().filter(|r| r.is_ok()).count();
        for (question, result) in paraphrases.iter().zip(&results) {
            if let Err(e) = result {
                warn!(source = %source.id, paraphrase = %question, error = %e, "Paraphrase not stored");
            }
        }
        debug!(source = %source.id, requested = paraphrases.len(), stored, "Paraphrases stored");
    }

    async fn insert_paraphrase(&self, question: &str, source: &QnaRecord) -> QnaResult<()> {
        let embedding = self.provider.embed(question).await?;
        let record = QnaRecord::new(question, &source.answer, &source.bot_id, embedding);
        self.store.insert_qna(&record).await?;
        Ok(())
    }

    /// Add pairs sequentially and commit them together, or not at all.
    pub async fn create_qna_batch(&self, entries: Vec<NewQna>) -> QnaResult<BatchResult> {
        if entries.is_empty() {
            return Err(QnaError::validation("batch must contain at least one entry"));
        }

        let mut known_bots = HashSet::new();
        let mut records = Vec::with_capacity(entries.len());
        for (i, new) in entries.iter().enumerate() {
            qna::validate_new(new).map_err(|e| match e {
                QnaError::ValidationError(msg) => {
                    QnaError::validation(format!("entry {}: {}", i + 1, msg))
                }
                other => other,
            })?;
            if known_bots.insert(new.bot_id.clone()) {
                self.ensure_bot(&new.bot_id).await?;
            }
            let embedding = self.provider.embed(&new.question).await.map_err(|e| {
                warn!(entry = i + 1, error = %e, "Batch aborted: embedding failed");
                e
            })?;
            records.push(QnaRecord::new(&new.question, &new.answer, &new.bot_id, embedding));
        }

        self.store
            .insert_qna_batch(&records)
            .await
            .map_err(|e| QnaError::Creation(e.to_string()))?;
        info!(count = records.len(), "QnA batch committed");

        Ok(BatchResult {
            success: true,
            count: records.len(),
            vectors: records,
        })
    }

    /// Get a record by ID.
    pub async fn get_qna(&self, id: &str) -> QnaResult<QnaRecord> {
        self.store
            .get_qna(id)
            .await?
            .ok_or_else(|| QnaError::InvalidQnaId(id.to_string()))
    }

    /// List records, newest first.
    pub async fn list_qna(&self, filter: &QnaFilter) -> QnaResult<Vec<QnaRecord>> {
        Ok(self.store.list_qna(filter).await?)
    }

    /// Apply a partial update. A new question is re-embedded.
    pub async fn update_qna(&self, id: &str, update: QnaUpdate) -> QnaResult<QnaRecord> {
        let mut record = self.get_qna(id).await?;
        if update.is_empty() {
            return Ok(record);
        }
        if update.question.as_deref().is_some_and(|q| q.trim().is_empty()) {
            return Err(QnaError::validation("question must not be empty"));
        }
        if update.answer.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(QnaError::validation("answer must not be empty"));
        }

        if let Some(question) = update.question {
            record.embedding = self.provider.embed(&question).await?;
            record.question = question;
        }
        if let Some(answer) = update.answer {
            record.answer = answer;
        }
        record.updated_at = chrono::Utc::now().to_rfc3339();

        self.store.update_qna(&record).await.map_err(|e| match e {
            StoreError::NotFound(_) => QnaError::InvalidQnaId(id.to_string()),
            other => QnaError::Update(other.to_string()),
        })?;
        info!(id, "QnA updated");
        Ok(record)
    }

    /// Delete a record and return what was removed.
    pub async fn delete_qna(&self, id: &str) -> QnaResult<QnaRecord> {
        let record = self.get_qna(id).await?;
        let removed = self
            .store
            .delete_qna(id)
            .await
            .map_err(|e| QnaError::Deletion(e.to_string()))?;
        if !removed {
            return Err(QnaError::InvalidQnaId(id.to_string()));
        }
        info!(id, "QnA deleted");
        Ok(record)
    }
}
