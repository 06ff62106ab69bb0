//! QnA record route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use qnabot_core::qna::{BatchResult, NewQna, QnaFilter, QnaRecord, QnaUpdate};
use serde::Deserialize;

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateBatchRequest {
    pub vectors: Vec<NewQna>,
}

pub async fn create_qna(
    State(state): State<AppState>,
    Json(req): Json<NewQna>,
) -> Result<(StatusCode, Json<QnaRecord>), ApiError> {
    let record = state
        .services
        .pipeline
        .create_qna(req)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn create_qna_batch(
    State(state): State<AppState>,
    Json(req): Json<CreateBatchRequest>,
) -> Result<(StatusCode, Json<BatchResult>), ApiError> {
    let result = state
        .services
        .pipeline
        .create_qna_batch(req.vectors)
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn list_qna(
    State(state): State<AppState>,
    Query(filter): Query<QnaFilter>,
) -> Result<Json<Vec<QnaRecord>>, ApiError> {
    let records = state
        .services
        .pipeline
        .list_qna(&filter)
        .await
        .map_err(api_error)?;
    Ok(Json(records))
}

pub async fn get_qna(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QnaRecord>, ApiError> {
    let record = state
        .services
        .pipeline
        .get_qna(&id)
        .await
        .map_err(api_error)?;
    Ok(Json(record))
}

pub async fn update_qna(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<QnaUpdate>,
) -> Result<Json<QnaRecord>, ApiError> {
    let record = state
        .services
        .pipeline
        .update_qna(&id, req)
        .await
        .map_err(api_error)?;
    Ok(Json(record))
}

pub async fn delete_qna(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QnaRecord>, ApiError> {
    let record = state
        .services
        .pipeline
        .delete_qna(&id)
        .await
        .map_err(api_error)?;
    Ok(Json(record))
}
