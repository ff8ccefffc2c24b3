//! Queued payloads
//!
//! Both payloads are flat JSON objects. Field names follow what the
//! producer side of the bot already writes, including the capitalized
//! keys of the completion record.

use crate::keys;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stored state of a tracked pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    /// Filed, never looked up yet
    Pending,
    Open,
    Closed,
    Merged,
    /// Last lookup failed, or the producer wrote a state we don't know
    #[serde(other)]
    Unknown,
}

impl ItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::Pending => "pending",
            ItemState::Open => "open",
            ItemState::Closed => "closed",
            ItemState::Merged => "merged",
            ItemState::Unknown => "unknown",
        }
    }

    /// The archive list for a terminal state, `None` while still in flight
    pub fn terminal_list(&self) -> Option<&'static str> {
        match self {
            ItemState::Closed => Some(keys::CLOSED),
            ItemState::Merged => Some(keys::MERGED),
            _ => None,
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request under observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedItem {
    /// Pull request number, unique within owner/repository
    pub id: u64,
    pub owner: String,
    pub repository: String,
    /// Overwritten on every poll
    pub state: ItemState,
    /// Informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Fields written by the producer that we carry along untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackedItem {
    pub fn new(
        id: u64,
        owner: impl Into<String>,
        repository: impl Into<String>,
        state: ItemState,
    ) -> Self {
        Self {
            id,
            owner: owner.into(),
            repository: repository.into(),
            state,
            title: None,
            extra: Map::new(),
        }
    }

    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl fmt::Display for TrackedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repository, self.id)
    }
}

/// A pull request whose outcome should be announced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Tweet that asked for the fix; empty when nobody asked
    #[serde(rename = "TweetID", default)]
    pub tweet_id: String,

    /// Link to the repository or pull request on GitHub
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "PullRequestId")]
    pub pull_request_id: u64,

    /// Lookups that came back inconclusive so far
    #[serde(rename = "Attempts", default, skip_serializing_if = "is_zero")]
    pub attempts: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl CompletionRecord {
    /// The tweet to reply to, if there is one
    pub fn reference_id(&self) -> Option<&str> {
        let id = self.tweet_id.trim();
        (!id.is_empty()).then_some(id)
    }

    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
