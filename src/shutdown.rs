//! Graceful-shutdown flag set by SIGINT/SIGTERM

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Single-writer cancellation flag: set by the signal listener, polled once
/// per loop iteration by the main loop, never reset. Repeated signals are
/// idempotent.
#[derive(Clone)]
pub struct ShutdownFlag {
    requested: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self {
            requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

impl Default for ShutdownFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the termination-signal listener. It does nothing on receipt but
/// flip the flag; all real work is deferred to the main loop's next check.
pub fn spawn_signal_listener(flag: ShutdownFlag) {
    tokio::spawn(listen(flag));
}

#[cfg(unix)]
async fn listen(flag: ShutdownFlag) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Failed to register SIGINT handler: {}", e);
            return;
        }
    };
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Failed to register SIGTERM handler: {}", e);
            return;
        }
    };

    loop {
        let received = tokio::select! {
            v = interrupt.recv() => v,
            v = terminate.recv() => v,
        };
        if received.is_none() {
            return;
        }
        flag.request();
    }
}

#[cfg(not(unix))]
async fn listen(flag: ShutdownFlag) {
    loop {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        flag.request();
    }
}
