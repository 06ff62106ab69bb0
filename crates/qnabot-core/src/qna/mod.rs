//! Question/answer records.

pub mod model;

pub use model::{BatchResult, NewQna, QnaFilter, QnaRecord, QnaUpdate, MAX_PAGE_SIZE};

use crate::error::{QnaError, QnaResult};

/// Reject blank questions or answers before any provider call is made.
pub fn validate_new(entry: &NewQna) -> QnaResult<()> {
    if entry.question.trim().is_empty() {
        return Err(QnaError::validation("question must not be empty"));
    }
    if entry.answer.trim().is_empty() {
        return Err(QnaError::validation("answer must not be empty"));
    }
    if entry.bot_id.trim().is_empty() {
        return Err(QnaError::validation("botId must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_is_not_serialized() {
        let record = QnaRecord::new("q", "a", "b1", vec![0.1, 0.2]);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("embedding").is_none());
        assert_eq!(json["botId"], "b1");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_validate_new() {
        assert!(validate_new(&NewQna::new("q", "a", "b")).is_ok());
        assert!(validate_new(&NewQna::new("  ", "a", "b")).is_err());
        assert!(validate_new(&NewQna::new("q", "", "b")).is_err());
        assert!(validate_new(&NewQna::new("q", "a", "")).is_err());
    }

    #[test]
    fn test_filter_needle() {
        let mut filter = QnaFilter::default();
        assert_eq!(filter.needle(), None);
        filter.q = Some("   ".to_string());
        assert_eq!(filter.needle(), None);
        filter.q = Some(" Reset ".to_string());
        assert_eq!(filter.needle().as_deref(), Some("reset"));
    }

    #[test]
    fn test_page_limit_is_capped() {
        let mut filter = QnaFilter::default();
        assert_eq!(filter.page_limit(), 20);
        filter.limit = usize::MAX;
        assert_eq!(filter.page_limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(QnaUpdate::default().is_empty());
        let update = QnaUpdate {
            answer: Some("x".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
