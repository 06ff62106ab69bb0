//! Bot registry queries in Redis.

use crate::client::{RedisPool, RedisResult};
use crate::keys;
use qnabot_core::bot::Bot;
use redis::AsyncCommands;

pub async fn create_bot(pool: &RedisPool, bot: &Bot) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.hset::<_, _, _, ()>(keys::bot(&bot.id), "data", serde_json::to_string(bot)?)
        .await?;
    conn.zadd::<_, _, _, ()>(keys::bot_index(), &bot.id, keys::now_score())
        .await?;
    Ok(())
}

pub async fn get_bot(pool: &RedisPool, id: &str) -> RedisResult<Option<Bot>> {
    let mut conn = pool.clone();
    let json: Option<String> = conn.hget(keys::bot(id), "data").await?;
    match json {
        Some(j) => Ok(Some(serde_json::from_str(&j)?)),
        None => Ok(None),
    }
}

/// All bots in registration order.
pub async fn list_bots(pool: &RedisPool) -> RedisResult<Vec<Bot>> {
    let mut conn = pool.clone();
    let ids: Vec<String> = conn.zrange(keys::bot_index(), 0, -1).await?;
    let mut bots = Vec::new();
    for id in ids {
        let mut c = pool.clone();
        let json: Option<String> = c.hget(keys::bot(&id), "data").await?;
        if let Some(j) = json {
            if let Ok(bot) = serde_json::from_str::<Bot>(&j) {
                bots.push(bot);
            }
        }
    }
    Ok(bots)
}
