//! Bot registry operations.

pub mod model;

pub use model::{Bot, NewBot};

use crate::error::{QnaError, QnaResult};
use crate::store::BotRegistry;
use tracing::info;

/// Reply used when a bot has no fallback message of its own.
pub const DEFAULT_FALLBACK: &str =
    "Unable to answer this currently, Can you ask me another question? \n";

/// Register a new bot.
pub async fn create_bot(
    registry: &dyn BotRegistry,
    new: NewBot,
    id: Option<&str>,
) -> QnaResult<Bot> {
    if new.name.trim().is_empty() {
        return Err(QnaError::validation("bot name must not be empty"));
    }
    if let Some(id) = id {
        if registry.find_bot(id).await?.is_some() {
            return Err(QnaError::validation(format!("bot '{}' already exists", id)));
        }
    }

    let bot = Bot::from_new(new, id);
    registry.create_bot(&bot).await?;
    info!(id = %bot.id, name = %bot.name, "Bot created");
    Ok(bot)
}

/// Get a bot by ID.
pub async fn get_bot(registry: &dyn BotRegistry, id: &str) -> QnaResult<Bot> {
    registry
        .find_bot(id)
        .await?
        .ok_or_else(|| QnaError::InvalidBotId(id.to_string()))
}

/// List all bots.
pub async fn list_bots(registry: &dyn BotRegistry) -> QnaResult<Vec<Bot>> {
    Ok(registry.list_bots().await?)
}

/// The reply served when retrieval finds no qualifying answer.
pub fn fallback_reply(bot: &Bot) -> String {
    match &bot.fallback_message {
        Some(msg) => msg.clone(),
        None => {
            let handover = if bot.handover_to_human {
                bot.handover_message.as_deref().unwrap_or("")
            } else {
                ""
            };
            format!("{}{}", DEFAULT_FALLBACK, handover)
        }
    }
}
