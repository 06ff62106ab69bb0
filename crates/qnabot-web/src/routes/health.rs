//! Health check.

use axum::{extract::State, http::StatusCode, Json};
use qnabot_engine::HealthReport;

use crate::state::AppState;

/// 200 when store and provider are both reachable, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.services.health().await;
    let status = if report.healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}
