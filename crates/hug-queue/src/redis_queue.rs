//! Redis-backed queue
//!
//! Each list name maps to a Redis list. Pushes use `RPUSH`, pops use
//! `BLPOP` with a whole-second timeout, so FIFO order and atomic dequeue
//! come from Redis itself.

use crate::error::QueueError;
use crate::queue::DurableQueue;
use async_trait::async_trait;
use log::{debug, info};
use redis::aio::MultiplexedConnection;
use std::time::Duration;

/// Queue over a single Redis connection
///
/// A blocking pop occupies the connection, so every consumer loop should
/// open its own `RedisQueue` rather than share one.
#[derive(Clone)]
pub struct RedisQueue {
    conn: MultiplexedConnection,
}

impl RedisQueue {
    /// Connect to the Redis server at `url` (e.g. `redis://127.0.0.1:6379`)
    pub async fn connect(url: &str) -> Result<Self, QueueError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Connected to Redis at {}", url);
        Ok(Self { conn })
    }
}

/// BLPOP takes whole seconds and treats 0 as "forever"
fn blpop_timeout(wait: Duration) -> u64 {
    wait.as_secs().max(1)
}

#[async_trait]
impl DurableQueue for RedisQueue {
    async fn push(&self, list: &str, payload: &[u8]) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        let length: i64 = redis::cmd("RPUSH")
            .arg(list)
            .arg(payload)
            .query_async(&mut conn)
            .await?;
        debug!("Pushed {} bytes onto {} (length {})", payload.len(), list, length);
        Ok(())
    }

    async fn pop(&self, list: &str, wait: Duration) -> Result<Option<Vec<u8>>, QueueError> {
        let mut conn = self.conn.clone();
        let popped: Option<(String, Vec<u8>)> = redis::cmd("BLPOP")
            .arg(list)
            .arg(blpop_timeout(wait))
            .query_async(&mut conn)
            .await?;
        Ok(popped.map(|(_key, payload)| payload))
    }
}
