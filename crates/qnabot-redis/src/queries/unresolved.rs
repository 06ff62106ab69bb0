//! Unresolved query log in Redis.

use crate::client::{RedisPool, RedisResult};
use crate::keys;
use qnabot_core::qna::MAX_PAGE_SIZE;
use qnabot_core::unresolved::{UnresolvedQuery, UnresolvedStatus};
use redis::AsyncCommands;

pub async fn create_unresolved(pool: &RedisPool, entry: &UnresolvedQuery) -> RedisResult<()> {
    let score = keys::now_score();
    let mut conn = pool.clone();
    let _: () = redis::pipe()
        .atomic()
        .hset(keys::unresolved(&entry.id), "data", serde_json::to_string(entry)?)
        .ignore()
        .zadd(keys::unresolved_index(None), &entry.id, score)
        .ignore()
        .zadd(keys::unresolved_index(Some(&entry.bot_id)), &entry.id, score)
        .ignore()
        .query_async(&mut conn)
        .await?;
    Ok(())
}

pub async fn get_unresolved(pool: &RedisPool, id: &str) -> RedisResult<Option<UnresolvedQuery>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(keys::unresolved(id), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

/// Entries newest first.
pub async fn list_unresolved(
    pool: &RedisPool,
    bot_id: Option<&str>,
    offset: usize,
    limit: usize,
) -> RedisResult<Vec<UnresolvedQuery>> {
    let Some((start, stop)) = keys::page_range(offset, limit.min(MAX_PAGE_SIZE)) else {
        return Ok(Vec::new());
    };
    let mut conn = pool.clone();
    let ids: Vec<String> = conn
        .zrevrange(keys::unresolved_index(bot_id), start, stop)
        .await?;
    let mut entries = Vec::new();
    for id in ids {
        if let Some(entry) = get_unresolved(pool, &id).await? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

pub async fn update_unresolved_status(
    pool: &RedisPool,
    id: &str,
    status: UnresolvedStatus,
) -> RedisResult<Option<UnresolvedQuery>> {
    let Some(mut entry) = get_unresolved(pool, id).await? else {
        return Ok(None);
    };
    entry.status = status;
    entry.updated_at = chrono::Utc::now().to_rfc3339();

    let mut conn = pool.clone();
    conn.hset::<_, _, _, ()>(keys::unresolved(id), "data", serde_json::to_string(&entry)?)
        .await?;
    Ok(Some(entry))
}

pub async fn delete_unresolved(pool: &RedisPool, id: &str) -> RedisResult<bool> {
    let Some(entry) = get_unresolved(pool, id).await? else {
        return Ok(false);
    };
    let mut conn = pool.clone();
    let _: () = redis::pipe()
        .atomic()
        .del(keys::unresolved(id))
        .ignore()
        .zrem(keys::unresolved_index(None), id)
        .ignore()
        .zrem(keys::unresolved_index(Some(&entry.bot_id)), id)
        .ignore()
        .query_async(&mut conn)
        .await?;
    Ok(true)
}
