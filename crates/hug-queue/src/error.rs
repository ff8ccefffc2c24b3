//! Error types for the queue.

use thiserror::Error;

/// Errors that can occur when talking to the queue backend.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Redis command or connection failed
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}
