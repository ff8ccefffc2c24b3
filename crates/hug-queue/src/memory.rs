//! In-process queue
//!
//! Same contract as the Redis backend without durability across restarts.
//! Used by tests and for running the pollers without a Redis server.

use crate::error::QueueError;
use crate::queue::DurableQueue;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct MemoryQueue {
    lists: Mutex<HashMap<String, VecDeque<Vec<u8>>>>,
    pushed: Notify,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every entry currently on `list`, head first
    pub fn snapshot(&self, list: &str) -> Vec<Vec<u8>> {
        self.lock()
            .get(list)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of entries on `list`
    pub fn len(&self, list: &str) -> usize {
        self.lock().get(list).map(VecDeque::len).unwrap_or(0)
    }

    pub fn is_empty(&self, list: &str) -> bool {
        self.len(list) == 0
    }

    fn try_pop(&self, list: &str) -> Option<Vec<u8>> {
        self.lock().get_mut(list).and_then(VecDeque::pop_front)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, VecDeque<Vec<u8>>>> {
        // A panic while holding the lock cannot leave a list half-modified
        self.lists
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DurableQueue for MemoryQueue {
    async fn push(&self, list: &str, payload: &[u8]) -> Result<(), QueueError> {
        self.lock()
            .entry(list.to_string())
            .or_default()
            .push_back(payload.to_vec());
        self.pushed.notify_waiters();
        Ok(())
    }

    async fn pop(&self, list: &str, wait: Duration) -> Result<Option<Vec<u8>>, QueueError> {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            // Register before checking so a push in between is not missed
            let pushed = self.pushed.notified();
            if let Some(payload) = self.try_pop(list) {
                return Ok(Some(payload));
            }
            if tokio::time::timeout_at(deadline, pushed).await.is_err() {
                return Ok(self.try_pop(list));
            }
        }
    }
}
