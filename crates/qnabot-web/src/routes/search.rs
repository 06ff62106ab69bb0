//! Search route handlers. All searches are POST with a JSON body.

use axum::{extract::State, Json};
use qnabot_core::search::{CandidateScore, EmbeddingSearchRequest, SearchRequest};

use super::{api_error, ApiError};
use crate::state::AppState;

type Candidates = Result<Json<Vec<CandidateScore>>, ApiError>;

pub async fn similar(
    State(state): State<AppState>,
    Json(req): Json<EmbeddingSearchRequest>,
) -> Candidates {
    let out = state
        .services
        .retrieval
        .search_by_embedding(&req)
        .await
        .map_err(api_error)?;
    Ok(Json(out))
}

pub async fn cosine(
    State(state): State<AppState>,
    Json(req): Json<EmbeddingSearchRequest>,
) -> Candidates {
    let out = state
        .services
        .retrieval
        .search_cosine_by_embedding(&req)
        .await
        .map_err(api_error)?;
    Ok(Json(out))
}

pub async fn similar_by_question(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Candidates {
    let out = state
        .services
        .retrieval
        .search_by_vector(&req)
        .await
        .map_err(api_error)?;
    Ok(Json(out))
}

pub async fn cosine_by_question(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Candidates {
    let out = state
        .services
        .retrieval
        .search_by_cosine(&req)
        .await
        .map_err(api_error)?;
    Ok(Json(out))
}

pub async fn hybrid_by_question(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Candidates {
    let out = state
        .services
        .retrieval
        .search_by_hybrid(&req)
        .await
        .map_err(api_error)?;
    Ok(Json(out))
}

/// Ensemble search. An empty list means nothing cleared the threshold.
pub async fn best_by_question(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Candidates {
    let out = state
        .services
        .retrieval
        .search_ensemble(&req)
        .await
        .map_err(api_error)?;
    Ok(Json(out))
}
