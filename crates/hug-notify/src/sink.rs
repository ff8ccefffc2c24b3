//! Fire-and-forget notification sink

use crate::twitter::TwitterClient;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Placeholder in reply templates, replaced by the referenced author's handle
pub const HANDLE_PLACEHOLDER: &str = "{handle}";

/// Somewhere to announce pull request outcomes
///
/// Both operations swallow their failures: they log and return. Nothing
/// is retried and nothing is queued for later.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Post a new top-level message
    async fn post(&self, text: &str);

    /// Reply to the message `reference_id`
    ///
    /// `template` may contain [`HANDLE_PLACEHOLDER`]; it is replaced by the
    /// author of the referenced message. If that lookup fails the reply
    /// is abandoned.
    async fn post_reply(&self, template: &str, reference_id: &str);
}

#[async_trait]
impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    async fn post(&self, text: &str) {
        (**self).post(text).await
    }

    async fn post_reply(&self, template: &str, reference_id: &str) {
        (**self).post_reply(template, reference_id).await
    }
}

#[async_trait]
impl NotificationSink for TwitterClient {
    async fn post(&self, text: &str) {
        info!("Posting tweet: {}", text);
        match self.send_tweet(text, None).await {
            Ok(tweet) => debug!("Posted tweet {}", tweet.id_str),
            Err(e) => error!("Twitter post failed: {}", e),
        }
    }

    async fn post_reply(&self, template: &str, reference_id: &str) {
        let original = match self.fetch_tweet(reference_id).await {
            Ok(tweet) => tweet,
            Err(e) => {
                warn!(
                    "Could not fetch tweet {}, dropping reply: {}",
                    reference_id, e
                );
                return;
            }
        };

        let text = template.replace(HANDLE_PLACEHOLDER, &original.user.screen_name);
        info!("Posting reply to {}: {}", reference_id, text);
        match self.send_tweet(&text, Some(reference_id)).await {
            Ok(tweet) => debug!("Posted reply {} to {}", tweet.id_str, reference_id),
            Err(e) => error!("Twitter reply to {} failed: {}", reference_id, e),
        }
    }
}
