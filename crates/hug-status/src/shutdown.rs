//! Signal handling

use log::{error, info};
use tokio_util::sync::CancellationToken;

/// Cancel `token` on Ctrl-C, or SIGTERM on unix
///
/// Returns early if the token is cancelled by someone else. If the
/// signal handlers cannot be installed the loops keep running.
pub async fn cancel_on_signal(token: CancellationToken) {
    tokio::select! {
        _ = token.cancelled() => {}
        signal = wait_for_signal() => match signal {
            Ok(name) => {
                info!("Received {}, shutting down", name);
                token.cancel();
            }
            Err(e) => error!("Failed to listen for shutdown signals: {}", e),
        },
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|_| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "Ctrl-C")
}
