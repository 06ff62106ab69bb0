//! Turns a user message into a bot reply.

use std::sync::Arc;

use qnabot_core::bot::{self, Bot};
use qnabot_core::search::{CandidateScore, SearchRequest};
use qnabot_core::unresolved::{self, UnresolvedQuery};
use qnabot_core::{BotRegistry, EmbeddingProvider, QnaResult, UnresolvedQueryLog};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::search::RetrievalEngine;

/// Candidates considered when answering a message.
pub const REPLY_CANDIDATES: usize = 3;

/// Reply to one user message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotReply {
    pub content: String,
    /// The candidate the reply was built from; `None` on fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<CandidateScore>,
    /// The unresolved query logged on fallback, if logging succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unresolved: Option<UnresolvedQuery>,
}

impl BotReply {
    pub fn is_fallback(&self) -> bool {
        self.matched.is_none()
    }
}

#[derive(Clone)]
pub struct ConversationService {
    retrieval: RetrievalEngine,
    bots: Arc<dyn BotRegistry>,
    log: Arc<dyn UnresolvedQueryLog>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl ConversationService {
    pub fn new(
        retrieval: RetrievalEngine,
        bots: Arc<dyn BotRegistry>,
        log: Arc<dyn UnresolvedQueryLog>,
        provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            retrieval,
            bots,
            log,
            provider,
        }
    }

    /// Answer `message` for `bot_id` within `conversation_id`.
    pub async fn reply(
        &self,
        bot_id: &str,
        conversation_id: &str,
        message: &str,
    ) -> QnaResult<BotReply> {
        let bot = bot::get_bot(self.bots.as_ref(), bot_id).await?;
        let request = SearchRequest::new(message, Some(bot_id), REPLY_CANDIDATES);
        let candidates = self.retrieval.search_ensemble(&request).await?;

        match candidates.into_iter().next() {
            Some(top) => {
                debug!(bot_id, id = %top.id, combined = ?top.combined_score, "Answer matched");
                let content = match self.provider.reword_answer(&top.question, &top.answer).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(bot_id, error = %e, "Answer rewrite failed, serving stored answer");
                        top.answer.clone()
                    }
                };
                Ok(BotReply {
                    content,
                    matched: Some(top),
                    unresolved: None,
                })
            }
            None => Ok(self.fallback(&bot, conversation_id, message).await),
        }
    }

    async fn fallback(&self, bot: &Bot, conversation_id: &str, message: &str) -> BotReply {
        info!(bot_id = %bot.id, conversation_id, "No qualifying answer, using fallback");
        let unresolved =
            match unresolved::record(self.log.as_ref(), &bot.id, conversation_id, message).await {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(bot_id = %bot.id, error = %e, "Could not log unresolved query");
                    None
                }
            };
        BotReply {
            content: bot::fallback_reply(bot),
            matched: None,
            unresolved,
        }
    }
}
