//! Pull request status tracking
//!
//! Two long-running loops share one queue backend but never the same list:
//!
//! ```text
//!   hug:pullrequests ──► PendingPoller ──┬─► hug:pullrequests (still open)
//!                                        ├─► hug:pullrequests:closed
//!                                        └─► hug:pullrequests:merged
//!
//!   hug:finished ──► CompletionNotifier ─┬─► one of the three lists above
//!                                        │   + one tweet
//!                                        └─► hug:finished / :failed (unresolved)
//! ```
//!
//! Each loop pops one entry, resolves it against GitHub, pushes it onward
//! and decides how long to wait before the next pop.

pub mod app;
pub mod cli;
pub mod completion;
pub mod github_url;
pub mod logger;
pub mod messages;
pub mod pending;
pub mod pidfile;
pub mod poller;
pub mod retry;
pub mod shutdown;

#[cfg(test)]
mod test_utils;

pub use cli::Cli;
pub use completion::CompletionNotifier;
pub use pending::PendingPoller;
pub use poller::{run_until_cancelled, Pace, PollSettings, Poller};
pub use retry::{Backoff, RetryPolicy};

use gh_client::PullRequestStatus;
use hug_queue::ItemState;

/// Stored state for a resolved status
pub fn item_state(status: PullRequestStatus) -> ItemState {
    match status {
        PullRequestStatus::Open => ItemState::Open,
        PullRequestStatus::Closed => ItemState::Closed,
        PullRequestStatus::Merged => ItemState::Merged,
        PullRequestStatus::Unknown => ItemState::Unknown,
    }
}
