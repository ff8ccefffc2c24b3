//! Error types for the notification client.

use thiserror::Error;

/// Errors that can occur when talking to the notification service.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The reference id is not a tweet id
    #[error("Invalid tweet id: {0:?}")]
    InvalidId(String),

    /// Request signing failed
    #[error("Signing failed: {0}")]
    Signing(String),
}
