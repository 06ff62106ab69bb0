//! Reply flow: matched answers, rewrites and the fallback path.

mod common;

use std::sync::Arc;

use common::{add_bot, services, support_bot, BrokenLog, ScriptedProvider};
use qnabot_core::bot::{NewBot, DEFAULT_FALLBACK};
use qnabot_core::qna::NewQna;
use qnabot_core::unresolved::UnresolvedStatus;
use qnabot_core::{QnaError, UnresolvedQueryLog};
use qnabot_engine::{ConversationService, Services};

async fn seed(svc: &Services, bot: NewBot) {
    add_bot(svc, "B1", bot).await;
    svc.pipeline
        .create_qna(NewQna::new(
            "How do I reset my password?",
            "Go to settings > security.",
            "B1",
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn matched_answer_is_reworded() {
    let (svc, _) = services(ScriptedProvider::default());
    seed(&svc, support_bot()).await;

    let reply = svc
        .conversation
        .reply("B1", "c1", "how can I reset my password")
        .await
        .unwrap();
    assert!(!reply.is_fallback());
    assert_eq!(reply.content, "Sure! Go to settings > security.");
    assert!(reply.unresolved.is_none());
}

#[tokio::test]
async fn failed_rewrite_serves_stored_answer() {
    let provider = ScriptedProvider::failing_reword();
    let (svc, _) = services(provider);
    seed(&svc, support_bot()).await;

    let reply = svc
        .conversation
        .reply("B1", "c1", "how can I reset my password")
        .await
        .unwrap();
    assert_eq!(reply.content, "Go to settings > security.");
    assert_eq!(
        reply.matched.unwrap().answer,
        "Go to settings > security."
    );
}

#[tokio::test]
async fn no_match_uses_bot_fallback_and_logs_query() {
    let (svc, store) = services(ScriptedProvider::default());
    let bot = NewBot {
        name: "Support".to_string(),
        fallback_message: Some("Please email support@example.com.".to_string()),
        ..Default::default()
    };
    seed(&svc, bot).await;

    let reply = svc
        .conversation
        .reply("B1", "c42", "what is the meaning of life")
        .await
        .unwrap();
    assert!(reply.is_fallback());
    assert_eq!(reply.content, "Please email support@example.com.");

    let logged = reply.unresolved.unwrap();
    assert_eq!(logged.status, UnresolvedStatus::Pending);
    assert_eq!(logged.conversation_id, "c42");
    assert_eq!(logged.query, "what is the meaning of life");

    let entries = store.list_unresolved(Some("B1"), 0, 10).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, logged.id);
}

#[tokio::test]
async fn default_fallback_appends_handover_message() {
    let (svc, _) = services(ScriptedProvider::default());
    let bot = NewBot {
        name: "Support".to_string(),
        handover_to_human: true,
        handover_message: Some("An agent will join shortly.".to_string()),
        ..Default::default()
    };
    seed(&svc, bot).await;

    let reply = svc
        .conversation
        .reply("B1", "c1", "do you sell gift cards")
        .await
        .unwrap();
    assert_eq!(
        reply.content,
        format!("{}An agent will join shortly.", DEFAULT_FALLBACK)
    );
}

#[tokio::test]
async fn unknown_bot_is_an_error() {
    let (svc, _) = services(ScriptedProvider::default());
    let err = svc.conversation.reply("ghost", "c1", "hello").await.unwrap_err();
    assert!(matches!(err, QnaError::InvalidBotId(_)));
}

#[tokio::test]
async fn message_embedding_failure_is_an_error() {
    let (svc, _) = services(ScriptedProvider::default().failing_on(&["hello"]));
    add_bot(&svc, "B1", support_bot()).await;
    let err = svc.conversation.reply("B1", "c1", "hello").await.unwrap_err();
    assert!(matches!(err, QnaError::Embedding(_)));
}

#[tokio::test]
async fn failing_unresolved_log_does_not_fail_reply() {
    let (svc, _) = services(ScriptedProvider::default());
    seed(&svc, support_bot()).await;

    let conversation = ConversationService::new(
        svc.retrieval.clone(),
        svc.bots.clone(),
        Arc::new(BrokenLog),
        svc.provider.clone(),
    );
    let reply = conversation
        .reply("B1", "c1", "what is the meaning of life")
        .await
        .unwrap();
    assert!(reply.is_fallback());
    assert_eq!(reply.content, DEFAULT_FALLBACK);
    assert!(reply.unresolved.is_none());
}
