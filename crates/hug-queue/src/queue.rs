//! Durable queue trait

use crate::error::QueueError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// An ordered, multi-list work queue keyed by list name
///
/// Guarantees FIFO order within a list and atomic dequeue: no two
/// consumers ever receive the same entry. There is no peek and no
/// delete-by-key; a popped entry is owned by whoever popped it.
///
/// Popping waits at most `wait` so callers can observe cancellation
/// between waits. Looping over `pop` gives an unbounded blocking pop.
#[async_trait]
pub trait DurableQueue: Send + Sync {
    /// Append `payload` to the tail of `list`
    async fn push(&self, list: &str, payload: &[u8]) -> Result<(), QueueError>;

    /// Remove and return the head of `list`, waiting up to `wait` for one
    ///
    /// Returns `Ok(None)` when the wait elapsed with the list still empty.
    async fn pop(&self, list: &str, wait: Duration) -> Result<Option<Vec<u8>>, QueueError>;
}

#[async_trait]
impl<Q: DurableQueue + ?Sized> DurableQueue for Arc<Q> {
    async fn push(&self, list: &str, payload: &[u8]) -> Result<(), QueueError> {
        (**self).push(list, payload).await
    }

    async fn pop(&self, list: &str, wait: Duration) -> Result<Option<Vec<u8>>, QueueError> {
        (**self).pop(list, wait).await
    }
}
