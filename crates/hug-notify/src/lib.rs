//! Notification sink for pull request outcomes
//!
//! Notifications are best-effort: a failed post is logged and forgotten.
//! There is no retry and no outbox.

pub mod error;
pub mod oauth;
pub mod sink;
pub mod twitter;

pub use error::NotifyError;
pub use oauth::Credentials;
pub use sink::{NotificationSink, HANDLE_PLACEHOLDER};
pub use twitter::{Tweet, TweetAuthor, TwitterClient};
