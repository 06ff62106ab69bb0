//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use qnabot_core::config::{ProviderKind, StoreKind};
use qnabot_core::Settings;
use qnabot_engine::{provider_from_settings, Services};
use qnabot_redis::RedisStore;

pub mod ask;
pub mod bot;
pub mod qna;
pub mod search;
pub mod serve;
pub mod status;
pub mod unresolved;

/// QnABot - chatbot builder with hybrid semantic retrieval
#[derive(Parser)]
#[command(name = "qnabot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "QNABOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the record store (redis, memory)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Override the embedding provider (ollama, hashing)
    #[arg(long, global = true)]
    pub provider: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve(serve::ServeArgs),

    /// Manage bots
    #[command(subcommand)]
    Bot(bot::BotCommands),

    /// Manage QnA records
    #[command(subcommand)]
    Qna(qna::QnaCommands),

    /// Search a bot's QnA bank
    Search(search::SearchArgs),

    /// Ask a bot a question, as an end user would
    Ask(ask::AskArgs),

    /// Triage questions bots could not answer
    #[command(subcommand)]
    Unresolved(unresolved::UnresolvedCommands),

    /// Show configuration and backend health
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(store) = &self.store {
            settings.store = StoreKind::parse(store)?;
        }
        if let Some(provider) = &self.provider {
            settings.provider = ProviderKind::parse(provider)?;
        }

        match self.command {
            Commands::Serve(args) => serve::execute(args, &settings).await,
            Commands::Bot(cmd) => bot::execute(cmd, &settings).await,
            Commands::Qna(cmd) => qna::execute(cmd, &settings).await,
            Commands::Search(args) => search::execute(args, &settings).await,
            Commands::Ask(args) => ask::execute(args, &settings).await,
            Commands::Unresolved(cmd) => unresolved::execute(cmd, &settings).await,
            Commands::Status => status::execute(&settings).await,
        }
    }
}

/// Wire the engine over the configured store and provider.
pub async fn connect(settings: &Settings) -> Result<Services> {
    let provider = provider_from_settings(settings)?;
    let services = match settings.store {
        StoreKind::Redis => {
            let store = RedisStore::connect(&settings.redis_url)
                .await
                .with_context(|| format!("Cannot connect to Redis at {}", settings.redis_url))?;
            Services::new(Arc::new(store), provider)
        }
        StoreKind::Memory => Services::in_memory(provider),
    };
    Ok(services)
}
