//! Wiring of stores and provider into the engine services.

use std::sync::Arc;

use qnabot_core::config::ProviderKind;
use qnabot_core::store::InMemoryStore;
use qnabot_core::{
    BotRegistry, EmbeddingProvider, QnaResult, QnaStore, Settings, UnresolvedQueryLog,
};
use serde::Serialize;

use crate::conversation::ConversationService;
use crate::hashing::HashingEmbedder;
use crate::ollama::OllamaClient;
use crate::pipeline::IngestionPipeline;
use crate::search::RetrievalEngine;

/// Build the provider selected in settings.
pub fn provider_from_settings(settings: &Settings) -> QnaResult<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match settings.provider {
        ProviderKind::Ollama => Arc::new(OllamaClient::from_settings(settings)?),
        ProviderKind::Hashing => Arc::new(HashingEmbedder::default()),
    };
    Ok(provider)
}

/// Reachability of the two external collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub store: bool,
    pub provider: bool,
}

impl HealthReport {
    pub fn healthy(&self) -> bool {
        self.store && self.provider
    }
}

/// Everything the HTTP layer and the CLI need, sharing one store and provider.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn QnaStore>,
    pub bots: Arc<dyn BotRegistry>,
    pub unresolved: Arc<dyn UnresolvedQueryLog>,
    pub provider: Arc<dyn EmbeddingProvider>,
    pub pipeline: IngestionPipeline,
    pub retrieval: RetrievalEngine,
    pub conversation: ConversationService,
}

impl Services {
    /// Wire services over a backend that implements every store contract.
    pub fn new<S>(backend: Arc<S>, provider: Arc<dyn EmbeddingProvider>) -> Self
    where
        S: QnaStore + BotRegistry + UnresolvedQueryLog + 'static,
    {
        let store: Arc<dyn QnaStore> = backend.clone();
        let bots: Arc<dyn BotRegistry> = backend.clone();
        let unresolved: Arc<dyn UnresolvedQueryLog> = backend;

        let pipeline = IngestionPipeline::new(store.clone(), bots.clone(), provider.clone());
        let retrieval = RetrievalEngine::new(store.clone(), provider.clone());
        let conversation = ConversationService::new(
            retrieval.clone(),
            bots.clone(),
            unresolved.clone(),
            provider.clone(),
        );

        Self {
            store,
            bots,
            unresolved,
            provider,
            pipeline,
            retrieval,
            conversation,
        }
    }

    /// Services over a fresh in-memory store.
    pub fn in_memory(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), provider)
    }

    pub async fn health(&self) -> HealthReport {
        let (store, provider) = tokio::join!(self.store.ping(), self.provider.health_check());
        HealthReport {
            store: store.is_ok(),
            provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_provider_from_settings() {
        let mut settings = Settings {
            provider: ProviderKind::Hashing,
            ..Default::default()
        };
        let hashing = provider_from_settings(&settings).unwrap();
        assert_eq!(hashing.embed("hello").await.unwrap().len(), 768);

        settings.provider = ProviderKind::Ollama;
        settings.timeout_secs = 1;
        assert!(provider_from_settings(&settings).is_ok());
    }
}
