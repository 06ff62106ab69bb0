//! Search types, similarity metrics and ranking.

pub mod model;
pub mod rank;
pub mod similarity;

pub use model::{CandidateScore, EmbeddingSearchRequest, ScoredRecord, SearchRequest, DEFAULT_LIMIT};
