//! # Cross-platform interrupt handling.
//!
//! Provides [`wait_for_interrupt`], an async helper that completes when the
//! process receives a termination signal.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//!
//! **Other platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners. If registration fails
/// the helper degrades to the portable ctrl-c handler; if that fails too
/// the future never completes and the run ends through the goal instead.
#[cfg(unix)]
pub async fn wait_for_interrupt() {
    use tokio::signal::unix::{SignalKind, signal};

    match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
        (Ok(mut sigint), Ok(mut sigterm)) => {
            tokio::select! {
                _ = sigint.recv() => {}
                _ = sigterm.recv() => {}
            }
        }
        _ => fallback_ctrl_c().await,
    }
}

/// Waits for a termination signal.
#[cfg(not(unix))]
pub async fn wait_for_interrupt() {
    fallback_ctrl_c().await;
}

async fn fallback_ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
