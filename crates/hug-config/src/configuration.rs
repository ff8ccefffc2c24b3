//! Application configuration
//!
//! Loaded once at startup from the file given on the command line.

use crate::config_file::{load_config_file, ConfigFormat};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration loaded from the `--config` file
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub twitter: TwitterConfig,

    #[serde(default)]
    pub redis: RedisConfig,

    #[serde(default)]
    pub polling: PollingConfig,
}

/// GitHub API access
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GitHubConfig {
    /// Personal access token; empty means "take it from the environment"
    #[serde(default)]
    pub api_token: String,

    /// API root for GitHub Enterprise; unset uses api.github.com
    #[serde(default)]
    pub base_uri: Option<String>,

    /// Host that completion record URLs must point at
    #[serde(default = "default_github_host")]
    pub host: String,
}

/// Twitter OAuth 1.0a credentials
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TwitterConfig {
    #[serde(default)]
    pub consumer_key: String,

    #[serde(default)]
    pub consumer_secret: String,

    #[serde(default)]
    pub access_token: String,

    #[serde(default)]
    pub access_token_secret: String,

    /// REST API root
    #[serde(default = "default_twitter_api_base")]
    pub api_base: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
}

/// Timing of the two polling loops
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PollingConfig {
    /// Delay after requeueing a pull request that is still open
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// First delay after a failure; doubles on each consecutive failure
    #[serde(default = "default_retry_initial_secs")]
    pub retry_initial_secs: u64,

    /// Upper bound for the failure delay
    #[serde(default = "default_retry_max_secs")]
    pub retry_max_secs: u64,

    /// Longest single wait on an empty list before checking for shutdown
    #[serde(default = "default_pop_wait_secs")]
    pub pop_wait_secs: u64,

    /// Inconclusive lookups allowed per completion record
    #[serde(default = "default_completion_max_attempts")]
    pub completion_max_attempts: u32,

    /// How long shutdown waits for in-flight iterations
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

fn default_github_host() -> String {
    "github.com".to_string()
}

fn default_twitter_api_base() -> String {
    "https://api.twitter.com/1.1".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_retry_initial_secs() -> u64 {
    1
}

fn default_retry_max_secs() -> u64 {
    60
}

fn default_pop_wait_secs() -> u64 {
    5
}

fn default_completion_max_attempts() -> u32 {
    5
}

fn default_shutdown_grace_secs() -> u64 {
    10
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_uri: None,
            host: default_github_host(),
        }
    }
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            consumer_key: String::new(),
            consumer_secret: String::new(),
            access_token: String::new(),
            access_token_secret: String::new(),
            api_base: default_twitter_api_base(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            retry_initial_secs: default_retry_initial_secs(),
            retry_max_secs: default_retry_max_secs(),
            pop_wait_secs: default_pop_wait_secs(),
            completion_max_attempts: default_completion_max_attempts(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn retry_initial(&self) -> Duration {
        Duration::from_secs(self.retry_initial_secs)
    }

    pub fn retry_max(&self) -> Duration {
        Duration::from_secs(self.retry_max_secs)
    }

    pub fn pop_wait(&self) -> Duration {
        Duration::from_secs(self.pop_wait_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Configuration {
    /// Load, parse and validate the configuration at `path`
    ///
    /// An empty GitHub token is filled from `GITHUB_TOKEN` / `GH_TOKEN`.
    pub fn load(path: &Path) -> Result<Self> {
        let (content, format) = load_config_file(path)?;
        let mut config = Self::parse(&content, format)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(token) = crate::resolve_github_token(&config.github.api_token) {
            config.github.api_token = token;
        }

        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration content without touching the environment
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Reject configurations the bot cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.github.api_token.trim().is_empty() {
            bail!("github.api_token is empty and neither GITHUB_TOKEN nor GH_TOKEN is set");
        }

        let twitter = [
            ("twitter.consumer_key", &self.twitter.consumer_key),
            ("twitter.consumer_secret", &self.twitter.consumer_secret),
            ("twitter.access_token", &self.twitter.access_token),
            ("twitter.access_token_secret", &self.twitter.access_token_secret),
        ];
        let missing: Vec<&str> = twitter
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            bail!("Missing Twitter credentials: {}", missing.join(", "));
        }

        if self.polling.retry_max_secs < self.polling.retry_initial_secs {
            bail!(
                "polling.retry_max_secs ({}) is below polling.retry_initial_secs ({})",
                self.polling.retry_max_secs,
                self.polling.retry_initial_secs
            );
        }

        if self.polling.completion_max_attempts == 0 {
            bail!("polling.completion_max_attempts must be at least 1");
        }

        Ok(())
    }
}
