//! Twitter REST client (API v1.1)

use crate::error::NotifyError;
use crate::oauth::Credentials;
use log::debug;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

/// A tweet as returned by the API, trimmed to what the bot reads
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id_str: String,
    pub user: TweetAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetAuthor {
    pub screen_name: String,
}

/// Twitter client signing every request with the bot's credentials
///
/// Long-lived; the inner HTTP client pools connections across calls.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    http: reqwest::Client,
    api_base: String,
    credentials: Credentials,
}

impl TwitterClient {
    /// Create a client against `api_base` (e.g. `https://api.twitter.com/1.1`)
    pub fn new(credentials: Credentials, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            credentials,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Fetch a single tweet by id
    pub async fn fetch_tweet(&self, id: &str) -> Result<Tweet, NotifyError> {
        let id = parse_tweet_id(id)?;
        let url = self.endpoint("statuses/show.json");
        let params = [("id", id)];
        let authorization = self.credentials.authorization("GET", &url, &params)?;

        debug!("Fetching tweet {}", id);
        let response = self
            .http
            .get(&url)
            .query(&params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        decode(response).await
    }

    /// Post a tweet, optionally as a reply to `in_reply_to`
    pub async fn send_tweet(
        &self,
        text: &str,
        in_reply_to: Option<&str>,
    ) -> Result<Tweet, NotifyError> {
        let mut params = vec![("status", text)];
        if let Some(id) = in_reply_to {
            params.push(("in_reply_to_status_id", parse_tweet_id(id)?));
        }
        let url = self.endpoint("statuses/update.json");
        let authorization = self.credentials.authorization("POST", &url, &params)?;

        let response = self
            .http
            .post(&url)
            .form(&params)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        decode(response).await
    }
}

/// Tweet ids are unsigned decimal integers
fn parse_tweet_id(id: &str) -> Result<&str, NotifyError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NotifyError::InvalidId(id.to_string()));
    }
    Ok(trimmed)
}

async fn decode(response: reqwest::Response) -> Result<Tweet, NotifyError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NotifyError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<Tweet>().await?)
}
