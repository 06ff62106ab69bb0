//! QnA record queries in Redis.

use crate::client::{RedisError, RedisPool, RedisResult};
use crate::keys;
use qnabot_core::qna::{QnaFilter, QnaRecord};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Stored form of a record. Unlike [`QnaRecord`]'s outward view it keeps the embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QnaRow {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub bot_id: String,
    pub embedding: Vec<f32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&QnaRecord> for QnaRow {
    fn from(r: &QnaRecord) -> Self {
        Self {
            id: r.id.clone(),
            question: r.question.clone(),
            answer: r.answer.clone(),
            bot_id: r.bot_id.clone(),
            embedding: r.embedding.clone(),
            created_at: r.created_at.clone(),
            updated_at: r.updated_at.clone(),
        }
    }
}

impl From<QnaRow> for QnaRecord {
    fn from(row: QnaRow) -> Self {
        Self {
            id: row.id,
            question: row.question,
            answer: row.answer,
            bot_id: row.bot_id,
            embedding: row.embedding,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub async fn create_qna(pool: &RedisPool, record: &QnaRecord) -> RedisResult<()> {
    create_qna_batch(pool, std::slice::from_ref(record)).await
}

/// Write all records inside one `MULTI`/`EXEC`.
pub async fn create_qna_batch(pool: &RedisPool, records: &[QnaRecord]) -> RedisResult<()> {
    let base = keys::now_score();
    let mut pipe = redis::pipe();
    pipe.atomic();
    for (i, record) in records.iter().enumerate() {
        let json = serde_json::to_string(&QnaRow::from(record))?;
        // Offset keeps newest-first order stable within a batch.
        let score = base + i as f64;
        pipe.hset(keys::qna(&record.id), "data", json)
            .ignore()
            .zadd(keys::qna_index(None), &record.id, score)
            .ignore()
            .zadd(keys::qna_index(Some(&record.bot_id)), &record.id, score)
            .ignore();
    }
    let mut conn = pool.clone();
    let _: () = pipe.query_async(&mut conn).await?;
    Ok(())
}

pub async fn get_qna(pool: &RedisPool, id: &str) -> RedisResult<Option<QnaRecord>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(keys::qna(id), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str::<QnaRow>(&j)?.into())),
        None => Ok(None),
    }
}

pub async fn update_qna(pool: &RedisPool, record: &QnaRecord) -> RedisResult<()> {
    let key = keys::qna(&record.id);
    let mut conn = pool.clone();
    let exists: bool = conn.exists(&key).await?;
    if !exists {
        return Err(RedisError::NotFound(record.id.clone()));
    }
    conn.hset::<_, _, _, ()>(&key, "data", serde_json::to_string(&QnaRow::from(record))?)
        .await?;
    Ok(())
}

pub async fn delete_qna(pool: &RedisPool, id: &str) -> RedisResult<bool> {
    let Some(record) = get_qna(pool, id).await? else {
        return Ok(false);
    };
    let mut conn = pool.clone();
    let _: () = redis::pipe()
        .atomic()
        .del(keys::qna(id))
        .ignore()
        .zrem(keys::qna_index(None), id)
        .ignore()
        .zrem(keys::qna_index(Some(&record.bot_id)), id)
        .ignore()
        .query_async(&mut conn)
        .await?;
    Ok(true)
}

/// Load records by id in one round trip, skipping ids whose hash is gone.
async fn load_many(pool: &RedisPool, ids: &[String]) -> RedisResult<Vec<QnaRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut pipe = redis::pipe();
    for id in ids {
        pipe.hget(keys::qna(id), "data");
    }
    let mut conn = pool.clone();
    let rows: Vec<Option<String>> = pipe.query_async(&mut conn).await?;
    let mut records = Vec::with_capacity(rows.len());
    for json in rows.into_iter().flatten() {
        if let Ok(row) = serde_json::from_str::<QnaRow>(&json) {
            records.push(row.into());
        }
    }
    Ok(records)
}

/// Every record in scope, oldest first.
pub async fn list_scope(pool: &RedisPool, bot_id: Option<&str>) -> RedisResult<Vec<QnaRecord>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrange(keys::qna_index(bot_id), 0, -1).await?;
    load_many(pool, &ids).await
}

pub async fn list_qna(pool: &RedisPool, filter: &QnaFilter) -> RedisResult<Vec<QnaRecord>> {
    let limit = filter.page_limit();
    let Some((start, stop)) = keys::page_range(filter.offset, limit) else {
        return Ok(Vec::new());
    };
    let index = keys::qna_index(filter.bot_id.as_deref());
    let mut conn = pool.clone();

    match filter.needle() {
        None => {
            let ids: Vec<String> = conn.zrevrange(&index, start, stop).await?;
            load_many(pool, &ids).await
        }
        Some(needle) => {
            let ids: Vec<String> = conn.zrevrange(&index, 0, -1).await?;
            Ok(load_many(pool, &ids)
                .await?
                .into_iter()
                .filter(|r| r.matches_text(&needle))
                .skip(filter.offset)
                .take(limit)
                .collect())
        }
    }
}

pub async fn count_qna(pool: &RedisPool, bot_id: Option<&str>) -> RedisResult<usize> {
    let mut conn = pool.clone();
    let count: usize = conn.zcard(keys::qna_index(bot_id)).await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_keeps_embedding() {
        let record = QnaRecord::new("q", "a", "b1", vec![0.5, -0.25]);
        let json = serde_json::to_string(&QnaRow::from(&record)).unwrap();
        let back: QnaRecord = serde_json::from_str::<QnaRow>(&json).unwrap().into();
        assert_eq!(back, record);

        // The outward view drops it.
        let outward = serde_json::to_value(&record).unwrap();
        assert!(outward.get("embedding").is_none());
    }
}
