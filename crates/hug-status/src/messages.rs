//! Notification texts

use gh_client::PullRequestStatus;
use hug_notify::HANDLE_PLACEHOLDER;
use hug_queue::TrackedItem;

/// A resolved outcome worth announcing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Open,
    Closed,
    Merged,
}

impl Outcome {
    /// `None` for an inconclusive lookup, which is never announced
    pub fn from_status(status: PullRequestStatus) -> Option<Self> {
        match status {
            PullRequestStatus::Open => Some(Outcome::Open),
            PullRequestStatus::Closed => Some(Outcome::Closed),
            PullRequestStatus::Merged => Some(Outcome::Merged),
            PullRequestStatus::Unknown => None,
        }
    }
}

/// Browser link to the tracked pull request
pub fn item_url(host: &str, item: &TrackedItem) -> String {
    format!(
        "https://{}/{}/{}/pull/{}",
        host, item.owner, item.repository, item.id
    )
}

/// Top-level post for someone who did not ask for the fix
pub fn announcement(outcome: Outcome, repository: &str, url: &str) -> String {
    match outcome {
        Outcome::Open => format!("I fixed some typos in {} and filed a PR: {}", repository, url),
        Outcome::Merged => format!(
            "I fixed some typos in {} and the PR got merged: {}",
            repository, url
        ),
        Outcome::Closed => format!(
            "I fixed some typos in {} but the PR was closed :( {}",
            repository, url
        ),
    }
}

/// Reply to the requester; still carries the handle placeholder
pub fn reply_template(outcome: Outcome, url: &str) -> String {
    let text = match outcome {
        Outcome::Open => "Thanks for the link. We checked the repository and filed a PR:",
        Outcome::Merged => "Thanks for the link. Our changes are already merged:",
        Outcome::Closed => "Thanks for the link, but our pull request was already closed:",
    };
    format!("- @{} {} {}", HANDLE_PLACEHOLDER, text, url)
}
