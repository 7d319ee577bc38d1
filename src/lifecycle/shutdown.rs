//! Shutdown coordination for the worker.

use std::time::Duration;

use crate::error::{Result, SupervisorError};
use crate::process::Supervisor;

/// Interrupt the worker, wait up to `grace` for it to exit, then kill it.
pub async fn graceful_shutdown(supervisor: &mut Supervisor, grace: Duration) -> Result<()> {
    if let Err(e) = supervisor.stop() {
        // Usually the worker is already gone; wait confirms it.
        tracing::warn!(error = %e, "Interrupt not delivered");
        return supervisor.wait().await;
    }

    match supervisor.wait_timeout(grace).await {
        Ok(()) => Ok(()),
        Err(SupervisorError::WaitTimeout { pid, elapsed }) => {
            tracing::warn!(
                pid,
                elapsed_ms = elapsed.as_millis() as u64,
                "Worker ignored interrupt, killing"
            );
            supervisor.kill()?;
            supervisor.wait().await
        }
        Err(e) => Err(e),
    }
}
