//! Ensemble ranking: merge cosine and hybrid hits per record, then keep only
//! candidates every signal agrees on.

use std::cmp::Ordering;
use std::collections::HashMap;

use qnabot_core::search::{CandidateScore, ScoredRecord};

/// Candidates fetched from each strategy before merging.
pub const ENSEMBLE_STRATEGY_LIMIT: usize = 3;

/// Every score must be strictly above this to survive.
pub const SCORE_THRESHOLD: f64 = 0.4;

/// Weight of each strategy in `combined_score`.
pub const STRATEGY_WEIGHT: f64 = 0.5;

/// Merge cosine hits (similarity) and hybrid hits (distance) by record id.
///
/// Output order is first appearance: cosine hits in their order, then
/// hybrid-only hits in theirs.
pub fn merge(cosine: Vec<ScoredRecord>, hybrid: Vec<ScoredRecord>) -> Vec<CandidateScore> {
    let mut merged: Vec<CandidateScore> = Vec::with_capacity(cosine.len() + hybrid.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for hit in cosine {
        let similarity = hit.score;
        if index.contains_key(&hit.record.id) {
            continue;
        }
        let mut candidate = CandidateScore::with_cosine_similarity(hit);
        candidate.cosine_score = Some(similarity);
        candidate.hybrid_score = Some(0.0);
        candidate.combined_score = Some(STRATEGY_WEIGHT * similarity);
        index.insert(candidate.id.clone(), merged.len());
        merged.push(candidate);
    }

    for hit in hybrid {
        let distance = hit.score;
        let similarity = 1.0 - distance;
        match index.get(&hit.record.id) {
            Some(&i) => {
                let candidate = &mut merged[i];
                candidate.hybrid_distance = Some(distance);
                candidate.hybrid_score = Some(similarity);
                candidate.combined_score =
                    Some(candidate.combined_score.unwrap_or(0.0) + STRATEGY_WEIGHT * similarity);
            }
            None => {
                let mut candidate = CandidateScore::with_hybrid_distance(hit);
                candidate.cosine_score = Some(0.0);
                candidate.hybrid_score = Some(similarity);
                candidate.combined_score = Some(STRATEGY_WEIGHT * similarity);
                index.insert(candidate.id.clone(), merged.len());
                merged.push(candidate);
            }
        }
    }

    merged
}

/// All four signals clear the threshold. A missing value fails.
pub fn qualifies(candidate: &CandidateScore) -> bool {
    [
        candidate.cosine_similarity,
        candidate.cosine_score,
        candidate.hybrid_score,
        candidate.combined_score,
    ]
    .iter()
    .all(|score| score.map(|s| s > SCORE_THRESHOLD).unwrap_or(false))
}

/// Merge, filter, sort by `combined_score` descending and truncate.
pub fn rank(cosine: Vec<ScoredRecord>, hybrid: Vec<ScoredRecord>, limit: usize) -> Vec<CandidateScore> {
    let mut candidates: Vec<CandidateScore> =
        merge(cosine, hybrid).into_iter().filter(qualifies).collect();
    // sort_by is stable: ties keep merge order.
    candidates.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use qnabot_core::qna::QnaRecord;

    fn hit(id: &str, score: f64) -> ScoredRecord {
        let mut record = QnaRecord::new(&format!("question {}", id), "answer", "b1", vec![]);
        record.id = id.to_string();
        ScoredRecord { record, score }
    }

    fn ids(candidates: &[CandidateScore]) -> Vec<&str> {
        candidates.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_merge_combines_both_strategies() {
        let merged = merge(vec![hit("a", 0.9)], vec![hit("a", 0.2), hit("b", 0.1)]);
        assert_eq!(ids(&merged), vec!["a", "b"]);

        let a = &merged[0];
        assert_eq!(a.cosine_similarity, Some(0.9));
        assert_eq!(a.cosine_score, Some(0.9));
        assert_eq!(a.hybrid_distance, Some(0.2));
        assert!((a.hybrid_score.unwrap() - 0.8).abs() < 1e-12);
        assert!((a.combined_score.unwrap() - 0.85).abs() < 1e-12);

        let b = &merged[1];
        assert_eq!(b.cosine_similarity, None);
        assert_eq!(b.cosine_score, Some(0.0));
        assert!((b.hybrid_score.unwrap() - 0.9).abs() < 1e-12);
        assert!((b.combined_score.unwrap() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_single_strategy_never_survives() {
        let cosine_only = rank(vec![hit("a", 0.99)], vec![], 5);
        assert!(cosine_only.is_empty());

        let hybrid_only = rank(vec![], vec![hit("b", 0.01)], 5);
        assert!(hybrid_only.is_empty());
    }

    #[test]
    fn test_threshold_is_strict_on_every_score() {
        // Cosine exactly at the threshold fails.
        assert!(rank(vec![hit("a", 0.4)], vec![hit("a", 0.0)], 5).is_empty());
        // A weak hybrid similarity fails even with a strong cosine.
        assert!(rank(vec![hit("a", 0.95)], vec![hit("a", 0.65)], 5).is_empty());
        // Both comfortably above.
        assert_eq!(rank(vec![hit("a", 0.5)], vec![hit("a", 0.5)], 5).len(), 1);
    }

    #[test]
    fn test_sorted_by_combined_descending_and_truncated() {
        let cosine = vec![hit("a", 0.6), hit("b", 0.9), hit("c", 0.7)];
        let hybrid = vec![hit("b", 0.1), hit("c", 0.2), hit("a", 0.3)];
        let out = rank(cosine.clone(), hybrid.clone(), 5);
        assert_eq!(ids(&out), vec!["b", "c", "a"]);
        assert!(out
            .windows(2)
            .all(|w| w[0].combined_score >= w[1].combined_score));
        for c in &out {
            assert!(qualifies(c));
        }

        assert_eq!(ids(&rank(cosine, hybrid, 2)), vec!["b", "c"]);
    }

    #[test]
    fn test_ties_keep_merge_order() {
        let out = rank(
            vec![hit("x", 0.8), hit("y", 0.8)],
            vec![hit("y", 0.3), hit("x", 0.3)],
            5,
        );
        assert_eq!(ids(&out), vec!["x", "y"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(rank(vec![], vec![], 5).is_empty());
    }
}
