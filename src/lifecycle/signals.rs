//! OS signal handling.
//!
//! # Responsibilities
//! - Register signal handlers (SIGTERM, SIGINT, SIGHUP)
//! - Translate the first signal into a graceful-shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP also shuts down: configuration is immutable, so there is
//!   nothing to reload

use std::io;

/// Wait until a termination signal arrives.
#[cfg(unix)]
pub async fn wait_for_termination() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut hangup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = terminate.recv() => tracing::info!(signal = "SIGTERM", "termination signal received"),
        _ = interrupt.recv() => tracing::info!(signal = "SIGINT", "termination signal received"),
        _ = hangup.recv() => tracing::info!(signal = "SIGHUP", "termination signal received"),
    }
    Ok(())
}

#[cfg(not(unix))]
pub async fn wait_for_termination() -> io::Result<()> {
    tokio::signal::ctrl_c().await?;
    tracing::info!(signal = "ctrl-c", "termination signal received");
    Ok(())
}
