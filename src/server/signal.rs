// Signal handling module
//
// Supported signals:
// - SIGTERM: stop accepting, return from serve
// - SIGINT:  same as SIGTERM (Ctrl+C)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Cancellation token for the accept loop.
///
/// Cloneable and usable from any thread. Once triggered it stays triggered.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
    requested: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the server to stop. The connection in progress, if any, is
    /// finished first.
    pub fn shutdown(&self) {
        self.requested.store(true, Ordering::SeqCst);
        // notify_one keeps a permit if the loop is not waiting right now
        self.notify.notify_one();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Resolve once `shutdown` has been called.
    pub async fn wait(&self) {
        while !self.is_requested() {
            self.notify.notified().await;
        }
    }
}

/// Start the signal listener task (Unix)
///
/// | Signal  | Action                               |
/// |---------|--------------------------------------|
/// | SIGTERM | Stop after the current connection    |
/// | SIGINT  | Stop after the current connection    |
///
/// Must be called from inside the server's runtime.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: ShutdownHandle) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        logger::log_signal_received(name);
        shutdown.shutdown();
    });

    Ok(())
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: ShutdownHandle) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_signal_received("Ctrl+C");
            shutdown.shutdown();
        }
    });

    Ok(())
}
