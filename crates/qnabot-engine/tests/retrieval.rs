//! Similarity strategies and ensemble ranking end to end.

mod common;

use common::{add_bot, services, support_bot, ScriptedProvider};
use qnabot_core::qna::NewQna;
use qnabot_core::search::{EmbeddingSearchRequest, SearchRequest};
use qnabot_core::{EmbeddingProvider, QnaError};
use qnabot_engine::ensemble::SCORE_THRESHOLD;
use qnabot_engine::Services;

async fn seeded() -> Services {
    let (svc, _) = services(ScriptedProvider::default());
    add_bot(&svc, "B1", support_bot()).await;
    add_bot(&svc, "B2", support_bot()).await;
    for (q, a, bot) in [
        ("How do I reset my password?", "Go to settings > security.", "B1"),
        ("What are your shipping costs?", "Shipping is free over $50.", "B1"),
        ("Can I return an item?", "Returns are accepted within 30 days.", "B1"),
        ("How do I reset my password?", "Ask your administrator.", "B2"),
    ] {
        svc.pipeline.create_qna(NewQna::new(q, a, bot)).await.unwrap();
    }
    svc
}

#[tokio::test]
async fn ensemble_finds_paraphrased_question() {
    let svc = seeded().await;
    let out = svc
        .retrieval
        .search_ensemble(&SearchRequest::new("how can I reset my password", Some("B1"), 5))
        .await
        .unwrap();

    assert_eq!(out.len(), 1);
    let top = &out[0];
    assert_eq!(top.answer, "Go to settings > security.");
    assert_eq!(top.bot_id, "B1");
    for score in [
        top.cosine_similarity,
        top.cosine_score,
        top.hybrid_score,
        top.combined_score,
    ] {
        assert!(score.unwrap() > SCORE_THRESHOLD);
    }
}

#[tokio::test]
async fn ensemble_on_empty_bot_is_empty() {
    let (svc, _) = services(ScriptedProvider::default());
    add_bot(&svc, "B1", support_bot()).await;
    let out = svc
        .retrieval
        .search_ensemble(&SearchRequest::new("how can I reset my password", Some("B1"), 5))
        .await
        .unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn ensemble_without_a_match_is_empty_not_an_error() {
    let svc = seeded().await;
    let out = svc
        .retrieval
        .search_ensemble(&SearchRequest::new("quantum chromodynamics lecture", Some("B1"), 5))
        .await
        .unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn ensemble_output_is_sorted_and_thresholded() {
    let svc = seeded().await;
    let out = svc
        .retrieval
        .search_ensemble(&SearchRequest::new("How do I reset my password?", None, 5))
        .await
        .unwrap();

    // Both bots hold the question; without a bot scope both qualify.
    assert_eq!(out.len(), 2);
    assert!(out
        .windows(2)
        .all(|w| w[0].combined_score >= w[1].combined_score));
    for c in &out {
        assert!(c.cosine_similarity.unwrap() > SCORE_THRESHOLD);
        assert!(c.combined_score.unwrap() > SCORE_THRESHOLD);
    }
}

#[tokio::test]
async fn strategies_are_bot_scoped_and_ordered() {
    let svc = seeded().await;
    let req = SearchRequest::new("How do I reset my password?", Some("B1"), 5);

    let vector = svc.retrieval.search_by_vector(&req).await.unwrap();
    assert_eq!(vector.len(), 3);
    assert!(vector.iter().all(|c| c.bot_id == "B1"));
    assert!(vector
        .windows(2)
        .all(|w| w[0].vector_distance <= w[1].vector_distance));

    let cosine = svc.retrieval.search_by_cosine(&req).await.unwrap();
    assert_eq!(cosine[0].answer, "Go to settings > security.");
    assert!(cosine
        .windows(2)
        .all(|w| w[0].cosine_similarity >= w[1].cosine_similarity));

    let hybrid = svc.retrieval.search_by_hybrid(&req).await.unwrap();
    assert_eq!(hybrid[0].answer, "Go to settings > security.");
    assert!(hybrid
        .windows(2)
        .all(|w| w[0].hybrid_distance <= w[1].hybrid_distance));
}

#[tokio::test]
async fn limit_bounds_each_strategy() {
    let svc = seeded().await;
    let req = SearchRequest::new("password", Some("B1"), 2);
    assert_eq!(svc.retrieval.search_by_cosine(&req).await.unwrap().len(), 2);
    assert_eq!(svc.retrieval.search_by_hybrid(&req).await.unwrap().len(), 2);
}

#[tokio::test]
async fn query_embedding_failure_is_an_error() {
    let (svc, _) = services(ScriptedProvider::default().failing_on(&["broken"]));
    let err = svc
        .retrieval
        .search_ensemble(&SearchRequest::new("broken", None, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, QnaError::Embedding(_)));
}

#[tokio::test]
async fn raw_embedding_search_spans_all_bots() {
    let svc = seeded().await;
    let embedding = svc
        .provider
        .embed("How do I reset my password?")
        .await
        .unwrap();

    let req = EmbeddingSearchRequest {
        embedding,
        limit: 2,
    };
    let nearest = svc.retrieval.search_by_embedding(&req).await.unwrap();
    assert_eq!(nearest.len(), 2);
    let mut bots: Vec<&str> = nearest.iter().map(|c| c.bot_id.as_str()).collect();
    bots.sort();
    assert_eq!(bots, vec!["B1", "B2"]);

    let cosine = svc.retrieval.search_cosine_by_embedding(&req).await.unwrap();
    assert!(cosine[0].cosine_similarity.unwrap() > 0.99);

    let empty = EmbeddingSearchRequest {
        embedding: Vec::new(),
        limit: 2,
    };
    assert!(matches!(
        svc.retrieval.search_by_embedding(&empty).await,
        Err(QnaError::ValidationError(_))
    ));
}
