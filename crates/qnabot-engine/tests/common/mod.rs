//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use qnabot_core::bot::{self, Bot, NewBot};
use qnabot_core::store::InMemoryStore;
use qnabot_core::unresolved::{UnresolvedQuery, UnresolvedStatus};
use qnabot_core::{EmbeddingError, EmbeddingProvider, StoreError, UnresolvedQueryLog};
use qnabot_engine::{HashingEmbedder, Services};

/// Hashing embedder with scripted generation and selectively failing embeds.
#[derive(Default)]
pub struct ScriptedProvider {
    inner: HashingEmbedder,
    pub paraphrases: Vec<String>,
    pub paraphrase_fails: bool,
    pub reword_fails: bool,
    /// Texts whose embedding fails with a transport error.
    pub unembeddable: HashSet<String>,
}

impl ScriptedProvider {
    pub fn with_paraphrases(paraphrases: &[&str]) -> Self {
        Self {
            paraphrases: paraphrases.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_paraphrase() -> Self {
        Self {
            paraphrase_fails: true,
            ..Default::default()
        }
    }

    pub fn failing_reword() -> Self {
        Self {
            reword_fails: true,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, texts: &[&str]) -> Self {
        self.unembeddable.extend(texts.iter().map(|s| s.to_string()));
        self
    }
}

#[async_trait]
impl EmbeddingProvider for ScriptedProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if self.unembeddable.contains(text) {
            return Err(EmbeddingError::Transport("connection reset".to_string()));
        }
        self.inner.embed(text).await
    }

    async fn paraphrase(&self, _question: &str) -> Result<Vec<String>, EmbeddingError> {
        if self.paraphrase_fails {
            return Err(EmbeddingError::Api {
                status: 500,
                body: "model crashed".to_string(),
            });
        }
        Ok(self.paraphrases.clone())
    }

    async fn reword_answer(&self, _question: &str, answer: &str) -> Result<String, EmbeddingError> {
        if self.reword_fails {
            return Err(EmbeddingError::Transport("timeout".to_string()));
        }
        Ok(format!("Sure! {}", answer))
    }
}

/// Unresolved log whose every write fails.
pub struct BrokenLog;

#[async_trait]
impl UnresolvedQueryLog for BrokenLog {
    async fn create_unresolved(&self, _entry: &UnresolvedQuery) -> Result<(), StoreError> {
        Err(StoreError::Backend("read-only replica".to_string()))
    }

    async fn get_unresolved(&self, _id: &str) -> Result<Option<UnresolvedQuery>, StoreError> {
        Ok(None)
    }

    async fn list_unresolved(
        &self,
        _bot_id: Option<&str>,
        _offset: usize,
        _limit: usize,
    ) -> Result<Vec<UnresolvedQuery>, StoreError> {
        Ok(Vec::new())
    }

    async fn update_unresolved_status(
        &self,
        _id: &str,
        _status: UnresolvedStatus,
    ) -> Result<Option<UnresolvedQuery>, StoreError> {
        Ok(None)
    }

    async fn delete_unresolved(&self, _id: &str) -> Result<bool, StoreError> {
        Ok(false)
    }
}

pub fn services(provider: ScriptedProvider) -> (Services, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let services = Services::new(store.clone(), Arc::new(provider));
    (services, store)
}

pub async fn add_bot(services: &Services, id: &str, new: NewBot) -> Bot {
    bot::create_bot(services.bots.as_ref(), new, Some(id))
        .await
        .expect("bot created")
}

pub fn support_bot() -> NewBot {
    NewBot {
        name: "Support".to_string(),
        ..Default::default()
    }
}
