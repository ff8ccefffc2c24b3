//! Doubles shared by the loop tests

use async_trait::async_trait;
use gh_client::{GitHubClient, PullRequest, PullRequestState};
use hug_notify::NotificationSink;
use hug_queue::{DurableQueue, MemoryQueue, QueueError};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::time::Duration;

/// GitHub client answering from a fixed table
///
/// A number mapped to `None`, or missing from the table, fails the lookup.
#[derive(Default)]
pub struct ScriptedClient {
    pub responses: HashMap<u64, Option<(PullRequestState, bool)>>,
    pub calls: Mutex<Vec<(String, String, u64)>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, number: u64, state: PullRequestState, merged: bool) -> Self {
        self.responses.insert(number, Some((state, merged)));
        self
    }

    pub fn failing(mut self, number: u64) -> Self {
        self.responses.insert(number, None);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GitHubClient for ScriptedClient {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        self.calls
            .lock()
            .unwrap()
            .push((owner.to_string(), repo.to_string(), pr_number));

        match self.responses.get(&pr_number).copied().flatten() {
            Some((state, merged)) => Ok(PullRequest {
                number: pr_number,
                state,
                merged,
                merged_at: None,
            }),
            None => anyhow::bail!("Not Found"),
        }
    }
}

/// Sink that remembers what it was asked to send
#[derive(Default)]
pub struct RecordingSink {
    pub posts: Mutex<Vec<String>>,
    pub replies: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn post(&self, text: &str) {
        self.posts.lock().unwrap().push(text.to_string());
    }

    async fn post_reply(&self, template: &str, reference_id: &str) {
        self.replies
            .lock()
            .unwrap()
            .push((template.to_string(), reference_id.to_string()));
    }
}

/// Queue whose backend is down for pushes, and for pops when `fail_pop` is set
///
/// Pops otherwise come from `inner`, so tests can hand the loop an entry
/// and watch the push that follows fail.
#[derive(Default)]
pub struct FailingQueue {
    pub inner: MemoryQueue,
    pub fail_pop: bool,
}

impl FailingQueue {
    pub fn unreachable() -> Self {
        Self {
            inner: MemoryQueue::new(),
            fail_pop: true,
        }
    }
}

fn connection_refused() -> QueueError {
    redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into()
}

#[async_trait]
impl DurableQueue for FailingQueue {
    async fn push(&self, _list: &str, _payload: &[u8]) -> Result<(), QueueError> {
        Err(connection_refused())
    }

    async fn pop(&self, list: &str, wait: Duration) -> Result<Option<Vec<u8>>, QueueError> {
        if self.fail_pop {
            return Err(connection_refused());
        }
        self.inner.pop(list, wait).await
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger that keeps records on the thread that emitted them
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger;

/// Start capturing log records emitted on the current thread
///
/// `#[tokio::test]` runs on a current-thread runtime, so everything the
/// loop under test logs lands here.
pub fn capture_logs() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE_LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());
}

/// Records at warn level or above captured on this thread
pub fn captured_warnings() -> Vec<String> {
    CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(level, _)| *level <= Level::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    })
}
