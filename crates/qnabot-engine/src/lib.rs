//! # QnABot Engine
//!
//! Embedding providers (Ollama, offline hashing), the ingestion pipeline,
//! similarity strategies, ensemble ranking and the conversation reply flow.

pub mod conversation;
pub mod ensemble;
pub mod hashing;
pub mod ollama;
pub mod pipeline;
pub mod prompts;
pub mod search;
pub mod services;

pub use conversation::{BotReply, ConversationService};
pub use hashing::HashingEmbedder;
pub use ollama::OllamaClient;
pub use pipeline::IngestionPipeline;
pub use search::RetrievalEngine;
pub use services::{provider_from_settings, HealthReport, Services};
