//! QnABot Redis Data Layer
//!
//! Async Redis persistence for QnA records, bots and the unresolved query log.

pub mod client;
pub mod keys;
pub mod queries;
pub mod store;

pub use client::{init_pool, RedisError, RedisPool, RedisResult};
pub use queries::bots;
pub use queries::qna;
pub use queries::unresolved;
pub use store::RedisStore;
