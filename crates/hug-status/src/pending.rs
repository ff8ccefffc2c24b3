//! Pending pull request loop
//!
//! Drains `hug:pullrequests`, looks every entry up on GitHub and either
//! puts it back (still open, or the lookup failed) or archives it on the
//! closed/merged list.

use crate::item_state;
use crate::poller::{Pace, PollSettings, Poller};
use crate::retry::Backoff;
use async_trait::async_trait;
use gh_client::{GitHubClient, PullRequestStatus, StatusResolver};
use hug_queue::{keys, DurableQueue, ItemState, TrackedItem};
use log::{debug, error, info, warn};

pub struct PendingPoller<Q, C> {
    queue: Q,
    resolver: StatusResolver<C>,
    settings: PollSettings,
    backoff: Backoff,
}

impl<Q: DurableQueue, C: GitHubClient> PendingPoller<Q, C> {
    pub fn new(queue: Q, client: C, settings: PollSettings) -> Self {
        Self {
            queue,
            resolver: StatusResolver::new(client),
            backoff: Backoff::new(settings.retry),
            settings,
        }
    }

    /// Back off after a local failure
    fn fail(&mut self) -> Pace {
        let delay = self.backoff.next_delay();
        debug!(
            "Backing off {:?} after {} consecutive failures",
            delay,
            self.backoff.failures()
        );
        Pace::Sleep(delay)
    }

    /// Push `payload` onto `list`; `then` is the pace on success
    async fn deliver(&mut self, list: &str, payload: &[u8], then: Pace) -> Pace {
        match self.queue.push(list, payload).await {
            Ok(()) => {
                self.backoff.reset();
                then
            }
            Err(e) => {
                error!(
                    "Failed to push to {}, entry lost: {}: {}",
                    list,
                    String::from_utf8_lossy(payload),
                    e
                );
                self.fail()
            }
        }
    }

    /// Re-encode `item` and push it onto `list`
    async fn deliver_item(&mut self, list: &str, item: &TrackedItem, then: Pace) -> Pace {
        match item.to_vec() {
            Ok(payload) => self.deliver(list, &payload, then).await,
            Err(e) => {
                error!("Failed to encode {}, entry lost: {}", item, e);
                self.fail()
            }
        }
    }
}

#[async_trait]
impl<Q: DurableQueue, C: GitHubClient> Poller for PendingPoller<Q, C> {
    fn name(&self) -> &'static str {
        "pending poller"
    }

    async fn process_next(&mut self) -> Pace {
        let payload = match self.queue.pop(keys::PENDING, self.settings.pop_wait).await {
            Ok(Some(payload)) => payload,
            Ok(None) => return Pace::Idle,
            Err(e) => {
                error!("Failed to pop {}: {}", keys::PENDING, e);
                return self.fail();
            }
        };

        let mut item = match TrackedItem::from_slice(&payload) {
            Ok(item) => item,
            Err(e) => {
                warn!(
                    "Dropping malformed entry from {}: {}: {}",
                    keys::PENDING,
                    String::from_utf8_lossy(&payload),
                    e
                );
                return self.fail();
            }
        };

        // Stale terminal entries go straight to their archive
        if let Some(list) = item.state.terminal_list() {
            debug!("{} is already {}, archiving", item, item.state);
            return self.deliver(list, &payload, Pace::Immediate).await;
        }

        debug!("Checking status of {}", item);
        let status = self
            .resolver
            .resolve(&item.owner, &item.repository, item.id)
            .await;

        match status {
            PullRequestStatus::Unknown => {
                info!("Status of {} unknown, requeueing", item);
                let interval = self.settings.interval;
                self.deliver(keys::PENDING, &payload, Pace::Sleep(interval))
                    .await
            }
            PullRequestStatus::Open => {
                debug!("{} still open", item);
                item.state = ItemState::Open;
                let interval = self.settings.interval;
                self.deliver_item(keys::PENDING, &item, Pace::Sleep(interval))
                    .await
            }
            PullRequestStatus::Closed | PullRequestStatus::Merged => {
                item.state = item_state(status);
                info!("{} is {}", item, item.state);
                match item.state.terminal_list() {
                    Some(list) => self.deliver_item(list, &item, Pace::Immediate).await,
                    None => self.fail(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use crate::test_utils::{FailingQueue, ScriptedClient};
    use gh_client::PullRequestState;
    use hug_queue::MemoryQueue;
    use std::sync::Arc;
    use std::time::Duration;

    fn settings() -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(30),
            pop_wait: Duration::from_millis(10),
            retry: RetryPolicy::new(Duration::from_secs(1), Duration::from_secs(60)),
        }
    }

    fn poller(
        client: ScriptedClient,
    ) -> (
        PendingPoller<Arc<MemoryQueue>, Arc<ScriptedClient>>,
        Arc<MemoryQueue>,
        Arc<ScriptedClient>,
    ) {
        let queue = Arc::new(MemoryQueue::new());
        let client = Arc::new(client);
        let poller = PendingPoller::new(queue.clone(), client.clone(), settings());
        (poller, queue, client)
    }

    async fn enqueue(queue: &MemoryQueue, item: &TrackedItem) -> Vec<u8> {
        let payload = item.to_vec().unwrap();
        queue.push(keys::PENDING, &payload).await.unwrap();
        payload
    }

    fn items(queue: &MemoryQueue, list: &str) -> Vec<TrackedItem> {
        queue
            .snapshot(list)
            .iter()
            .map(|payload| TrackedItem::from_slice(payload).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_merged_item_is_archived() {
        let (mut poller, queue, client) =
            poller(ScriptedClient::new().with(42, PullRequestState::Closed, true));
        enqueue(
            &queue,
            &TrackedItem::new(42, "acme", "widgets", ItemState::Pending),
        )
        .await;

        assert_eq!(poller.process_next().await, Pace::Immediate);

        let merged = items(&queue, keys::MERGED);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, 42);
        assert_eq!(merged[0].state, ItemState::Merged);
        assert!(queue.is_empty(keys::PENDING));
        assert!(queue.is_empty(keys::CLOSED));
        assert_eq!(
            client.calls.lock().unwrap()[0],
            ("acme".to_string(), "widgets".to_string(), 42)
        );
    }

    #[tokio::test]
    async fn test_closed_item_never_returns_to_pending() {
        let (mut poller, queue, client) =
            poller(ScriptedClient::new().with(5, PullRequestState::Closed, false));
        enqueue(&queue, &TrackedItem::new(5, "acme", "widgets", ItemState::Open)).await;

        assert_eq!(poller.process_next().await, Pace::Immediate);
        assert_eq!(poller.process_next().await, Pace::Idle);

        assert_eq!(items(&queue, keys::CLOSED)[0].state, ItemState::Closed);
        assert!(queue.is_empty(keys::PENDING));
        assert!(queue.is_empty(keys::MERGED));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_open_requeue_only_changes_state() {
        let (mut poller, queue, _client) =
            poller(ScriptedClient::new().with(42, PullRequestState::Open, false));
        let mut item = TrackedItem::new(42, "acme", "widgets", ItemState::Pending);
        item.title = Some("Fix typos in README".to_string());
        enqueue(&queue, &item).await;

        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(30))
        );

        item.state = ItemState::Open;
        assert_eq!(queue.snapshot(keys::PENDING), vec![item.to_vec().unwrap()]);
        assert!(queue.is_empty(keys::CLOSED));
        assert!(queue.is_empty(keys::MERGED));
    }

    #[tokio::test]
    async fn test_producer_fields_survive_requeue() {
        let (mut poller, queue, _client) =
            poller(ScriptedClient::new().with(3, PullRequestState::Open, false));
        let raw = br#"{"id":3,"owner":"acme","repository":"widgets","state":"pending","filed_by":"hugbot"}"#;
        queue.push(keys::PENDING, raw).await.unwrap();

        poller.process_next().await;

        let requeued = queue.snapshot(keys::PENDING);
        assert_eq!(
            requeued[0],
            br#"{"id":3,"owner":"acme","repository":"widgets","state":"open","filed_by":"hugbot"}"#
                .to_vec()
        );
    }

    #[tokio::test]
    async fn test_failed_lookup_requeues_unchanged_and_waits() {
        let (mut poller, queue, client) = poller(ScriptedClient::new().failing(9));
        let payload = enqueue(
            &queue,
            &TrackedItem::new(9, "acme", "widgets", ItemState::Pending),
        )
        .await;

        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(30))
        );

        assert_eq!(queue.snapshot(keys::PENDING), vec![payload]);
        assert_eq!(client.call_count(), 1);
        assert!(queue.is_empty(keys::CLOSED));
        assert!(queue.is_empty(keys::MERGED));
    }

    #[tokio::test]
    async fn test_stale_terminal_entry_skips_lookup() {
        let (mut poller, queue, client) = poller(ScriptedClient::new());
        let payload = enqueue(
            &queue,
            &TrackedItem::new(11, "acme", "widgets", ItemState::Merged),
        )
        .await;

        assert_eq!(poller.process_next().await, Pace::Immediate);

        assert_eq!(queue.snapshot(keys::MERGED), vec![payload]);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_entries_back_off() {
        let (mut poller, queue, client) = poller(ScriptedClient::new());
        queue.push(keys::PENDING, b"not json").await.unwrap();
        queue.push(keys::PENDING, br#"{"id":1}"#).await.unwrap();

        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(1))
        );
        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(2))
        );

        assert!(queue.is_empty(keys::PENDING));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_resets_backoff() {
        let (mut poller, queue, _client) =
            poller(ScriptedClient::new().with(1, PullRequestState::Closed, false));
        queue.push(keys::PENDING, b"{}").await.unwrap();
        enqueue(&queue, &TrackedItem::new(1, "acme", "widgets", ItemState::Open)).await;
        queue.push(keys::PENDING, b"{}").await.unwrap();

        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(1))
        );
        assert_eq!(poller.process_next().await, Pace::Immediate);
        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(1))
        );
    }

    #[tokio::test]
    async fn test_empty_list_is_idle() {
        let (mut poller, _queue, client) = poller(ScriptedClient::new());
        assert_eq!(poller.process_next().await, Pace::Idle);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_push_backs_off() {
        let queue = Arc::new(FailingQueue::default());
        let client = Arc::new(
            ScriptedClient::new()
                .with(1, PullRequestState::Closed, false)
                .with(2, PullRequestState::Open, false),
        );
        enqueue(&queue.inner, &TrackedItem::new(1, "acme", "widgets", ItemState::Pending)).await;
        enqueue(&queue.inner, &TrackedItem::new(2, "acme", "widgets", ItemState::Pending)).await;
        let mut poller = PendingPoller::new(queue.clone(), client.clone(), settings());

        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(1))
        );
        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(2))
        );
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_queue_backs_off() {
        let client = Arc::new(ScriptedClient::new());
        let mut poller =
            PendingPoller::new(FailingQueue::unreachable(), client.clone(), settings());

        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(1))
        );
        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(2))
        );
        assert_eq!(
            poller.process_next().await,
            Pace::Sleep(Duration::from_secs(4))
        );
        assert_eq!(client.call_count(), 0);
    }
}
