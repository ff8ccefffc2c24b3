//! Process wiring
//!
//! Builds the clients from configuration, starts both loops and keeps them
//! running until a shutdown signal arrives or one of them dies.

use crate::cli::Cli;
use crate::completion::CompletionNotifier;
use crate::pending::PendingPoller;
use crate::pidfile;
use crate::poller::{run_until_cancelled, PollSettings, Poller};
use crate::shutdown;
use anyhow::{Context, Result};
use gh_client::OctocrabClient;
use hug_config::Configuration;
use hug_notify::{Credentials, TwitterClient};
use hug_queue::RedisQueue;
use log::{debug, error, info, warn};
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Run the bot until it is told to stop
///
/// Only startup problems are returned; once the loops run every failure
/// is handled inside them.
pub async fn run(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.pidfile {
        if let Err(e) = pidfile::write(path) {
            warn!("{:#}", e);
        }
    }

    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded .env file from: {:?}", path),
        Err(_) => debug!(".env file not found, relying on environment variables"),
    }

    let config = Configuration::load(&cli.config)?;
    let settings = PollSettings::from_config(&config.polling);

    let github = OctocrabClient::with_token(
        &config.github.api_token,
        config.github.base_uri.as_deref(),
    )
    .context("Failed to create GitHub client")?;

    let credentials = Credentials {
        consumer_key: config.twitter.consumer_key.clone(),
        consumer_secret: config.twitter.consumer_secret.clone(),
        access_token: config.twitter.access_token.clone(),
        access_token_secret: config.twitter.access_token_secret.clone(),
    };
    let twitter = TwitterClient::new(credentials, config.twitter.api_base.clone());

    // One connection per loop: a blocked pop holds its connection
    let pending_queue = RedisQueue::connect(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;
    let completion_queue = RedisQueue::connect(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;

    let pending = PendingPoller::new(pending_queue, github.clone(), settings);
    let completion = CompletionNotifier::new(
        completion_queue,
        github,
        twitter,
        settings,
        config.github.host.clone(),
        config.polling.completion_max_attempts,
    );

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown::cancel_on_signal(cancel.clone()));

    supervise(pending, completion, cancel, config.polling.shutdown_grace()).await;
    info!("Shutdown complete");
    Ok(())
}

/// Run two loops until `cancel` fires, then give them `grace` to finish
///
/// If either loop ends on its own (it panicked) the other is cancelled too.
pub async fn supervise<A, B>(first: A, second: B, cancel: CancellationToken, grace: Duration)
where
    A: Poller + 'static,
    B: Poller + 'static,
{
    let mut tasks = JoinSet::new();
    tasks.spawn(run_until_cancelled(first, cancel.clone()));
    tasks.spawn(run_until_cancelled(second, cancel.clone()));

    tokio::select! {
        _ = cancel.cancelled() => {}
        Some(result) = tasks.join_next() => {
            if let Err(e) = result {
                error!("Polling loop failed: {}", e);
            }
            warn!("A polling loop stopped unexpectedly, shutting down");
            cancel.cancel();
        }
    }

    let drained = tokio::time::timeout(grace, async {
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                error!("Polling loop failed: {}", e);
            }
        }
    })
    .await;

    if drained.is_err() {
        warn!(
            "Polling loops still busy after {:?}, abandoning them",
            grace
        );
        tasks.abort_all();
    }
}
