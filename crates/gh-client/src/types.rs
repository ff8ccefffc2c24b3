//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the queue payloads so this
//! crate stays free of queue concerns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pull request from the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// Open/closed flag as reported by GitHub
    pub state: PullRequestState,

    /// Whether the PR was merged
    pub merged: bool,

    /// When the PR was merged, if it was
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// A merged PR is also closed on GitHub; either signal counts
    pub fn is_merged(&self) -> bool {
        self.merged || self.merged_at.is_some()
    }
}

/// Open/closed state of a pull request on GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    Open,
    Closed,
}
