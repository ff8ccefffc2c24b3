//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.

use crate::client::GitHubClient;
use crate::types::{PullRequest, PullRequestState};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Build a client authenticated with a personal access token
    ///
    /// `base_uri` overrides the API root (GitHub Enterprise); `None` keeps
    /// octocrab's default of `https://api.github.com`.
    pub fn with_token(token: &str, base_uri: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .with_context(|| format!("Invalid GitHub base URI: {}", uri))?;
        }
        let octocrab = builder.build().context("Failed to build GitHub client")?;
        Ok(Self::new(Arc::new(octocrab)))
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        debug!("Fetching PR {}/{}#{}", owner, repo, pr_number);

        let pr = self.octocrab.pulls(owner, repo).get(pr_number).await?;

        Ok(convert_pull_request(&pr))
    }
}

/// Convert octocrab PullRequest to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        state: convert_issue_state(pr.state.as_ref()),
        merged: pr.merged.unwrap_or(false),
        merged_at: pr.merged_at,
    }
}

/// Convert octocrab IssueState to our state; anything not closed is still open
fn convert_issue_state(state: Option<&octocrab::models::IssueState>) -> PullRequestState {
    match state {
        Some(octocrab::models::IssueState::Closed) => PullRequestState::Closed,
        _ => PullRequestState::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octocrab::models::IssueState;

    #[test]
    fn test_convert_issue_state() {
        assert_eq!(
            convert_issue_state(Some(&IssueState::Closed)),
            PullRequestState::Closed
        );
        assert_eq!(
            convert_issue_state(Some(&IssueState::Open)),
            PullRequestState::Open
        );
        assert_eq!(convert_issue_state(None), PullRequestState::Open);
    }

    #[tokio::test]
    async fn test_with_token_rejects_bad_base_uri() {
        let result = OctocrabClient::with_token("token", Some("not a uri"));
        assert!(result.is_err());
    }
}
