//! Completion loop
//!
//! Drains `hug:finished`, resolves each record's pull request, files it on
//! the list matching its status and announces the outcome exactly once.
//! Records whose status cannot be resolved go back to `hug:finished` until
//! they run out of attempts, then to `hug:finished:failed`.

use crate::github_url::parse_repository_url;
use crate::item_state;
use crate::messages::{self, Outcome};
use crate::poller::{Pace, PollSettings, Poller};
use crate::retry::Backoff;
use async_trait::async_trait;
use gh_client::{GitHubClient, StatusResolver};
use hug_notify::NotificationSink;
use hug_queue::{keys, CompletionRecord, DurableQueue, TrackedItem};
use log::{debug, error, info, warn};

pub struct CompletionNotifier<Q, C, N> {
    queue: Q,
    resolver: StatusResolver<C>,
    sink: N,
    settings: PollSettings,
    host: String,
    max_attempts: u32,
    backoff: Backoff,
}

impl<Q, C, N> CompletionNotifier<Q, C, N>
where
    Q: DurableQueue,
    C: GitHubClient,
    N: NotificationSink,
{
    /// `host` is the only host accepted in record URLs
    pub fn new(
        queue: Q,
        client: C,
        sink: N,
        settings: PollSettings,
        host: impl Into<String>,
        max_attempts: u32,
    ) -> Self {
        Self {
            queue,
            resolver: StatusResolver::new(client),
            sink,
            backoff: Backoff::new(settings.retry),
            settings,
            host: host.into(),
            max_attempts,
        }
    }

    fn fail(&mut self) -> Pace {
        let delay = self.backoff.next_delay();
        debug!(
            "Backing off {:?} after {} consecutive failures",
            delay,
            self.backoff.failures()
        );
        Pace::Sleep(delay)
    }

    /// Put an unresolved record back, or give up on it
    async fn retry_later(&mut self, mut record: CompletionRecord) -> Pace {
        record.attempts = record.attempts.saturating_add(1);
        let list = if record.attempts >= self.max_attempts {
            warn!(
                "Giving up on {} after {} attempts",
                record.url, record.attempts
            );
            keys::FINISHED_FAILED
        } else {
            info!(
                "Status of {} unknown (attempt {}), requeueing",
                record.url, record.attempts
            );
            keys::FINISHED
        };

        match record.to_vec() {
            Ok(payload) => {
                if let Err(e) = self.queue.push(list, &payload).await {
                    error!(
                        "Failed to push to {}, record lost: {}: {}",
                        list,
                        String::from_utf8_lossy(&payload),
                        e
                    );
                }
            }
            Err(e) => error!("Failed to encode record for {}: {}", record.url, e),
        }
        self.fail()
    }

    async fn notify(&self, outcome: Outcome, record: &CompletionRecord, item: &TrackedItem) {
        let url = messages::item_url(&self.host, item);
        match record.reference_id() {
            Some(reference_id) => {
                let template = messages::reply_template(outcome, &url);
                self.sink.post_reply(&template, reference_id).await;
            }
            None => {
                let text = messages::announcement(outcome, &item.repository, &url);
                self.sink.post(&text).await;
            }
        }
    }
}

#[async_trait]
impl<Q, C, N> Poller for CompletionNotifier<Q, C, N>
where
    Q: DurableQueue,
    C: GitHubClient,
    N: NotificationSink,
{
    fn name(&self) -> &'static str {
        "completion notifier"
    }

    async fn process_next(&mut self) -> Pace {
        let payload = match self.queue.pop(keys::FINISHED, self.settings.pop_wait).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Pace::Idle,
            Err(e) => {
                error!("Failed to pop {}: {}", keys::FINISHED, e);
                return self.fail();
            }
        };

        if payload.iter().all(u8::is_ascii_whitespace) {
            warn!("Empty entry on {}, no job", keys::FINISHED);
            return self.fail();
        }

        let record = match CompletionRecord::from_slice(&payload) {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "Dropping malformed entry from {}: {}: {}",
                    keys::FINISHED,
                    String::from_utf8_lossy(&payload),
                    e
                );
                return self.fail();
            }
        };

        let repo = match parse_repository_url(&record.url, &self.host) {
            Ok(repo) => repo,
            Err(e) => {
                warn!("Dropping record for {}: {}", record.url, e);
                return self.fail();
            }
        };

        debug!(
            "Checking status of {}/{}#{}",
            repo.owner, repo.repository, record.pull_request_id
        );
        let status = self
            .resolver
            .resolve(&repo.owner, &repo.repository, record.pull_request_id)
            .await;

        let Some(outcome) = Outcome::from_status(status) else {
            return self.retry_later(record).await;
        };

        let item = TrackedItem::new(
            record.pull_request_id,
            repo.owner,
            repo.repository,
            item_state(status),
        );
        let list = item.state.terminal_list().unwrap_or(keys::PENDING);

        let pushed = match item.to_vec() {
            Ok(encoded) => self.queue.push(list, &encoded).await.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = pushed {
            error!("Failed to file {} on {}, not announcing: {}", item, list, e);
            return self.fail();
        }
        self.backoff.reset();

        info!("{} is {}, filed on {}", item, item.state, list);
        self.notify(outcome, &record, &item).await;
        Pace::Immediate
    }
}
