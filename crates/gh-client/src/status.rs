//! Pull request status resolution
//!
//! Turns the GitHub view of a pull request into the four-valued status
//! used to route queued work. Resolution never fails: any API error is
//! folded into [`PullRequestStatus::Unknown`], and callers decide when
//! to try again.

use crate::client::GitHubClient;
use crate::types::PullRequestState;
use log::debug;
use std::fmt;

/// Routing status of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullRequestStatus {
    Open,
    Closed,
    Merged,
    /// The lookup failed; no routing decision is possible yet
    Unknown,
}

impl PullRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestStatus::Open => "open",
            PullRequestStatus::Closed => "closed",
            PullRequestStatus::Merged => "merged",
            PullRequestStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves pull request status through a [`GitHubClient`]
///
/// Holds no retry logic; backoff is the caller's job.
#[derive(Debug, Clone)]
pub struct StatusResolver<C> {
    client: C,
}

impl<C: GitHubClient> StatusResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Resolve the status of `owner/repo#pr_number`
    ///
    /// Merged wins over the open/closed flag, since GitHub reports merged
    /// pull requests as closed.
    pub async fn resolve(&self, owner: &str, repo: &str, pr_number: u64) -> PullRequestStatus {
        let pr = match self.client.fetch_pull_request(owner, repo, pr_number).await {
            Ok(pr) => pr,
            Err(e) => {
                debug!(
                    "Status lookup for {}/{}#{} failed: {:#}",
                    owner, repo, pr_number, e
                );
                return PullRequestStatus::Unknown;
            }
        };

        let status = if pr.is_merged() {
            PullRequestStatus::Merged
        } else {
            match pr.state {
                PullRequestState::Open => PullRequestStatus::Open,
                PullRequestState::Closed => PullRequestStatus::Closed,
            }
        };
        debug!("{}/{}#{} is {}", owner, repo, pr.number, status);
        status
    }
}
