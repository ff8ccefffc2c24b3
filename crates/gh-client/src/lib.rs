//! GitHub pull request client with status resolution
//!
//! This crate provides a trait-based GitHub API client and a resolver that
//! turns a pull request into the status used for routing queued work.
//! The resolver is generic over the client, so tests can swap the octocrab
//! implementation for an in-memory one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_request()                          │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │         │ StatusResolver<C>   │
//! │ (direct API)    │◄────────│ (never fails)       │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{OctocrabClient, PullRequestStatus, StatusResolver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = OctocrabClient::with_token("token", None)?;
//! let resolver = StatusResolver::new(client);
//!
//! match resolver.resolve("rust-lang", "rust", 1).await {
//!     PullRequestStatus::Merged => println!("merged"),
//!     other => println!("{}", other),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod octocrab_client;
pub mod status;
pub mod types;

pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use status::{PullRequestStatus, StatusResolver};
pub use types::{PullRequest, PullRequestState};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
