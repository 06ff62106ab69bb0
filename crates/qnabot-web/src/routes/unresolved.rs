//! Unresolved query triage handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use qnabot_core::unresolved::{self, UnresolvedQuery, UnresolvedStatus};
use serde::Deserialize;

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub bot_id: Option<String>,
    pub offset: usize,
    pub limit: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            bot_id: None,
            offset: 0,
            limit: 20,
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub async fn list_unresolved(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UnresolvedQuery>>, ApiError> {
    let entries = unresolved::list(
        state.services.unresolved.as_ref(),
        query.bot_id.as_deref(),
        query.offset,
        query.limit,
    )
    .await
    .map_err(api_error)?;
    Ok(Json(entries))
}

pub async fn get_unresolved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UnresolvedQuery>, ApiError> {
    let entry = unresolved::get(state.services.unresolved.as_ref(), &id)
        .await
        .map_err(api_error)?;
    Ok(Json(entry))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<UnresolvedQuery>, ApiError> {
    let status = UnresolvedStatus::from_str(&req.status).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            format!(
                "Invalid status '{}'. Use: pending, skipped, resolved",
                req.status
            ),
        )
    })?;
    let entry = unresolved::set_status(state.services.unresolved.as_ref(), &id, status)
        .await
        .map_err(api_error)?;
    Ok(Json(entry))
}

pub async fn delete_unresolved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    unresolved::delete(state.services.unresolved.as_ref(), &id)
        .await
        .map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
