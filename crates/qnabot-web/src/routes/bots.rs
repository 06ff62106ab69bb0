//! Bot route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use qnabot_core::bot::{self, Bot, NewBot};
use qnabot_engine::BotReply;
use serde::Deserialize;

use super::{api_error, ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateBotRequest {
    /// Explicit id, for imports. Generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub bot: NewBot,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub conversation_id: String,
    pub message: String,
}

pub async fn create_bot(
    State(state): State<AppState>,
    Json(req): Json<CreateBotRequest>,
) -> Result<(StatusCode, Json<Bot>), ApiError> {
    let bot = bot::create_bot(state.services.bots.as_ref(), req.bot, req.id.as_deref())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(bot)))
}

pub async fn list_bots(State(state): State<AppState>) -> Result<Json<Vec<Bot>>, ApiError> {
    let bots = bot::list_bots(state.services.bots.as_ref())
        .await
        .map_err(api_error)?;
    Ok(Json(bots))
}

pub async fn get_bot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bot>, ApiError> {
    let bot = bot::get_bot(state.services.bots.as_ref(), &id)
        .await
        .map_err(api_error)?;
    Ok(Json(bot))
}

pub async fn reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<BotReply>, ApiError> {
    if req.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "message must not be empty".to_string()));
    }
    let reply = state
        .services
        .conversation
        .reply(&id, &req.conversation_id, &req.message)
        .await
        .map_err(api_error)?;
    Ok(Json(reply))
}
