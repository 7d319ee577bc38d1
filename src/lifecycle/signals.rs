//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for SIGTERM and SIGINT
//! - Report which one arrived so the runner can begin graceful shutdown
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Handlers are registered up front so no signal is lost between
//!   startup and the first await

use tokio::signal::unix::{signal, Signal, SignalKind};

/// Registered shutdown signal streams.
pub struct ShutdownSignals {
    terminate: Signal,
    interrupt: Signal,
}

impl ShutdownSignals {
    /// Register SIGTERM and SIGINT handlers. Must run inside a Tokio runtime.
    pub fn register() -> std::io::Result<Self> {
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            interrupt: signal(SignalKind::interrupt())?,
        })
    }

    /// Wait for the next shutdown signal and return its name.
    pub async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.terminate.recv() => "SIGTERM",
            _ = self.interrupt.recv() => "SIGINT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::sys::signal::{kill, Signal as NixSignal};
    use nix::unistd::Pid;
    use std::time::Duration;

    #[tokio::test]
    async fn test_receives_sigterm() {
        let mut signals = ShutdownSignals::register().unwrap();

        kill(Pid::this(), NixSignal::SIGTERM).unwrap();

        let name = tokio::time::timeout(Duration::from_secs(5), signals.recv())
            .await
            .unwrap();
        assert_eq!(name, "SIGTERM");
    }
}
