//! Query modules for every entity stored in Redis.

pub mod bots;
pub mod qna;
pub mod unresolved;
