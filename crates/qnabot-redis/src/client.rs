//! Redis connection pool management.

use qnabot_core::StoreError;
use redis::aio::ConnectionManager;
use thiserror::Error;

/// Redis error types.
#[derive(Error, Debug)]
pub enum RedisError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type for Redis operations.
pub type RedisResult<T> = Result<T, RedisError>;

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        match e {
            RedisError::Connection(e) => StoreError::Backend(e.to_string()),
            RedisError::Serialization(e) => StoreError::Serialization(e.to_string()),
            RedisError::NotFound(id) => StoreError::NotFound(id),
        }
    }
}

/// ConnectionManager multiplexes internally and is Clone, so callers clone it
/// to get a mutable handle for each operation.
pub type RedisPool = ConnectionManager;

/// Initialize a Redis connection pool from a URL.
///
/// Example URL: `redis://127.0.0.1:6379`
pub async fn init_pool(redis_url: &str) -> RedisResult<RedisPool> {
    let client = redis::Client::open(redis_url)?;
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}

/// Round-trip a `PING`.
pub async fn ping(pool: &RedisPool) -> RedisResult<()> {
    let mut conn = pool.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let e: StoreError = RedisError::NotFound("q1".to_string()).into();
        assert_eq!(e, StoreError::NotFound("q1".to_string()));

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: StoreError = RedisError::from(json_err).into();
        assert!(matches!(e, StoreError::Serialization(_)));
    }
}
