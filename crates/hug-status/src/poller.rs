//! Shared driver for the polling loops

use crate::retry::RetryPolicy;
use async_trait::async_trait;
use hug_config::PollingConfig;
use log::info;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// What the loop should do after one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Nothing was popped within the wait; try again right away
    Idle,
    /// Pop the next entry right away
    Immediate,
    /// Wait before popping again
    Sleep(Duration),
}

/// Timing shared by both loops
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    /// Delay after putting a still-open pull request back on its list
    pub interval: Duration,
    /// Longest single wait on an empty list
    pub pop_wait: Duration,
    /// Delays after failures
    pub retry: RetryPolicy,
}

impl PollSettings {
    pub fn from_config(config: &PollingConfig) -> Self {
        Self {
            interval: config.interval(),
            pop_wait: config.pop_wait(),
            retry: RetryPolicy::new(config.retry_initial(), config.retry_max()),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from_config(&PollingConfig::default())
    }
}

/// One polling loop: pop, resolve, route
#[async_trait]
pub trait Poller: Send {
    /// Name used in log lines
    fn name(&self) -> &'static str;

    /// Run one iteration
    ///
    /// Waits at most the configured pop wait for an entry. Once an entry
    /// is popped the iteration always finishes routing it.
    async fn process_next(&mut self) -> Pace;
}

/// Drive `poller` until `cancel` fires
///
/// Cancellation is checked before every pop and interrupts pacing sleeps.
/// It never interrupts an iteration that already holds an entry.
pub async fn run_until_cancelled<P: Poller>(mut poller: P, cancel: CancellationToken) {
    let name = poller.name();
    info!("{} started", name);

    while !cancel.is_cancelled() {
        match poller.process_next().await {
            Pace::Idle | Pace::Immediate => {}
            Pace::Sleep(delay) => {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }

    info!("{} stopped", name);
}
