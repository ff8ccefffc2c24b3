//! GitHub client trait
//!
//! This module defines the `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::types::PullRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// GitHub API client trait
///
/// Defines the read-only slice of the GitHub API that status tracking
/// needs. Implementations can hit the API directly or be test doubles.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequest};
///
/// async fn show(client: &dyn GitHubClient) -> anyhow::Result<PullRequest> {
///     client.fetch_pull_request("rust-lang", "rust", 1).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch a single pull request by number
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    ///
    /// # Returns
    ///
    /// The pull request details, or an error if the call failed for any
    /// reason (network, not found, authentication).
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest>;
}

#[async_trait]
impl<C: GitHubClient + ?Sized> GitHubClient for Arc<C> {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequest> {
        (**self).fetch_pull_request(owner, repo, pr_number).await
    }
}
