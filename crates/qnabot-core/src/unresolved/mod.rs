//! Unresolved query log: questions that found no qualifying answer.

pub mod model;

pub use model::{UnresolvedQuery, UnresolvedStatus};

use crate::error::{QnaError, QnaResult};
use crate::qna::MAX_PAGE_SIZE;
use crate::store::UnresolvedQueryLog;
use tracing::info;

/// Record a pending unresolved query.
pub async fn record(
    log: &dyn UnresolvedQueryLog,
    bot_id: &str,
    conversation_id: &str,
    query: &str,
) -> QnaResult<UnresolvedQuery> {
    let entry = UnresolvedQuery::pending(bot_id, conversation_id, query);
    log.create_unresolved(&entry).await?;
    info!(id = %entry.id, bot_id, "Unresolved query recorded");
    Ok(entry)
}

/// Get an unresolved query by ID.
pub async fn get(log: &dyn UnresolvedQueryLog, id: &str) -> QnaResult<UnresolvedQuery> {
    log.get_unresolved(id)
        .await?
        .ok_or_else(|| QnaError::InvalidUnresolvedQueryId(id.to_string()))
}

/// List unresolved queries, newest first.
pub async fn list(
    log: &dyn UnresolvedQueryLog,
    bot_id: Option<&str>,
    offset: usize,
    limit: usize,
) -> QnaResult<Vec<UnresolvedQuery>> {
    Ok(log
        .list_unresolved(bot_id, offset, limit.min(MAX_PAGE_SIZE))
        .await?)
}

/// Move an unresolved query to a new triage status.
pub async fn set_status(
    log: &dyn UnresolvedQueryLog,
    id: &str,
    status: UnresolvedStatus,
) -> QnaResult<UnresolvedQuery> {
    let updated = log
        .update_unresolved_status(id, status)
        .await?
        .ok_or_else(|| QnaError::InvalidUnresolvedQueryId(id.to_string()))?;
    info!(id, status = status.as_str(), "Unresolved query status updated");
    Ok(updated)
}

/// Delete an unresolved query.
pub async fn delete(log: &dyn UnresolvedQueryLog, id: &str) -> QnaResult<()> {
    if !log.delete_unresolved(id).await? {
        return Err(QnaError::InvalidUnresolvedQueryId(id.to_string()));
    }
    info!(id, "Unresolved query deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            UnresolvedStatus::Pending,
            UnresolvedStatus::Skipped,
            UnresolvedStatus::Resolved,
        ] {
            assert_eq!(UnresolvedStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(UnresolvedStatus::from_str("RESOLVED"), Some(UnresolvedStatus::Resolved));
        assert_eq!(UnresolvedStatus::from_str("closed"), None);
    }

    #[test]
    fn test_pending_entry() {
        let q = UnresolvedQuery::pending("b1", "c1", "where is my order?");
        assert_eq!(q.status, UnresolvedStatus::Pending);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["conversationId"], "c1");
    }
}
