//! Durable work queue for pull request tracking
//!
//! This crate provides:
//! - The `DurableQueue` trait: named FIFO lists with tail push and
//!   blocking head pop
//! - `RedisQueue`, backed by Redis lists (`RPUSH` / `BLPOP`)
//! - `MemoryQueue`, an in-process implementation for tests and local runs
//! - The list keys and JSON payloads exchanged through the queue

pub mod error;
pub mod keys;
pub mod memory;
pub mod payload;
pub mod queue;
pub mod redis_queue;

pub use error::QueueError;
pub use memory::MemoryQueue;
pub use payload::{CompletionRecord, ItemState, TrackedItem};
pub use queue::DurableQueue;
pub use redis_queue::RedisQueue;
