//! Brute-force ranking over a scoped set of records.
//!
//! Store backends without a native vector index load the bot-scoped records
//! and rank them here, so every backend orders candidates identically.

use std::cmp::Ordering;

use super::model::ScoredRecord;
use super::similarity::{cosine_distance, cosine_similarity, hybrid_distance, trigram_similarity};
use crate::qna::QnaRecord;

/// Whether a record belongs to the requested bot scope.
pub fn in_scope(record: &QnaRecord, bot_id: Option<&str>) -> bool {
    bot_id.map(|b| record.bot_id == b).unwrap_or(true)
}

/// Records ordered by cosine distance, ascending.
pub fn by_vector_distance<I>(records: I, query: &[f32], limit: usize) -> Vec<ScoredRecord>
where
    I: IntoIterator<Item = QnaRecord>,
{
    let scored = records
        .into_iter()
        .map(|record| {
            let score = cosine_distance(&record.embedding, query);
            ScoredRecord { record, score }
        })
        .collect();
    top(scored, limit, Ordering::Less)
}

/// Records ordered by cosine similarity, descending.
pub fn by_cosine_similarity<I>(records: I, query: &[f32], limit: usize) -> Vec<ScoredRecord>
where
    I: IntoIterator<Item = QnaRecord>,
{
    let scored = records
        .into_iter()
        .map(|record| {
            let score = cosine_similarity(&record.embedding, query);
            ScoredRecord { record, score }
        })
        .collect();
    top(scored, limit, Ordering::Greater)
}

/// Records ordered by hybrid distance against the query text, ascending.
pub fn by_hybrid<I>(records: I, query: &[f32], query_text: &str, limit: usize) -> Vec<ScoredRecord>
where
    I: IntoIterator<Item = QnaRecord>,
{
    let scored = records
        .into_iter()
        .map(|record| {
            let lexical = trigram_similarity(&record.question, query_text);
            let score = hybrid_distance(cosine_distance(&record.embedding, query), lexical);
            ScoredRecord { record, score }
        })
        .collect();
    top(scored, limit, Ordering::Less)
}

/// Stable sort with `first` deciding which side of the comparison leads, then truncate.
fn top(mut scored: Vec<ScoredRecord>, limit: usize, first: Ordering) -> Vec<ScoredRecord> {
    scored.sort_by(|a, b| {
        let ord = a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal);
        if first == Ordering::Less {
            ord
        } else {
            ord.reverse()
        }
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, question: &str, bot: &str, embedding: Vec<f32>) -> QnaRecord {
        let mut r = QnaRecord::new(question, "answer", bot, embedding);
        r.id = id.to_string();
        r
    }

    fn fixtures() -> Vec<QnaRecord> {
        vec![
            record("far", "shipping costs", "b1", vec![0.0, 1.0]),
            record("near", "reset password", "b1", vec![1.0, 0.1]),
            record("mid", "change password", "b1", vec![1.0, 1.0]),
        ]
    }

    fn ids(scored: &[ScoredRecord]) -> Vec<&str> {
        scored.iter().map(|s| s.record.id.as_str()).collect()
    }

    #[test]
    fn test_vector_distance_ascending() {
        let out = by_vector_distance(fixtures(), &[1.0, 0.0], 10);
        assert_eq!(ids(&out), vec!["near", "mid", "far"]);
        assert!(out.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_cosine_descending() {
        let out = by_cosine_similarity(fixtures(), &[1.0, 0.0], 10);
        assert_eq!(ids(&out), vec!["near", "mid", "far"]);
        assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_limit_truncates() {
        assert_eq!(by_cosine_similarity(fixtures(), &[1.0, 0.0], 2).len(), 2);
        assert!(by_vector_distance(fixtures(), &[1.0, 0.0], 0).is_empty());
    }

    #[test]
    fn test_hybrid_rewards_lexical_overlap() {
        // Same embedding for both; only the question text differs.
        let records = vec![
            record("other", "shipping costs", "b1", vec![1.0, 0.0]),
            record("match", "reset password", "b1", vec![1.0, 0.0]),
        ];
        let out = by_hybrid(records, &[1.0, 0.0], "reset my password", 10);
        assert_eq!(ids(&out), vec!["match", "other"]);
        assert!(out[0].score < out[1].score);
    }

    #[test]
    fn test_scope() {
        let r = record("x", "q", "b1", vec![1.0]);
        assert!(in_scope(&r, None));
        assert!(in_scope(&r, Some("b1")));
        assert!(!in_scope(&r, Some("b2")));
    }
}
