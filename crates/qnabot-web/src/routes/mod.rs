//! Route handlers.

pub mod bots;
pub mod health;
pub mod qna;
pub mod search;
pub mod unresolved;

use axum::http::StatusCode;
use qnabot_core::{EmbeddingError, QnaError};
use tracing::error;

/// Error half of every handler result.
pub type ApiError = (StatusCode, String);

/// Map a domain error onto a status code.
pub fn api_error(e: QnaError) -> ApiError {
    let status = match &e {
        QnaError::InvalidBotId(_)
        | QnaError::InvalidQnaId(_)
        | QnaError::InvalidUnresolvedQueryId(_) => StatusCode::NOT_FOUND,
        QnaError::ValidationError(_) | QnaError::Embedding(EmbeddingError::EmptyInput) => {
            StatusCode::BAD_REQUEST
        }
        QnaError::Embedding(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(error = %e, "Request failed");
    }
    (status, e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qnabot_core::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (QnaError::InvalidBotId("b".into()), StatusCode::NOT_FOUND),
            (QnaError::InvalidQnaId("q".into()), StatusCode::NOT_FOUND),
            (QnaError::InvalidUnresolvedQueryId("u".into()), StatusCode::NOT_FOUND),
            (QnaError::validation("bad"), StatusCode::BAD_REQUEST),
            (EmbeddingError::EmptyInput.into(), StatusCode::BAD_REQUEST),
            (
                EmbeddingError::Transport("refused".into()).into(),
                StatusCode::BAD_GATEWAY,
            ),
            (QnaError::Creation("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (StoreError::Backend("down".into()).into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(api_error(err).0, expected);
        }
    }
}
