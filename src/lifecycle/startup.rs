//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn validated settings into a supervisor descriptor
//! - Write the FPM config the worker will read
//! - Clear a stale pid file so a previous run's pid is never adopted
//!
//! # Design Decisions
//! - Fail fast: any preparation error is fatal
//! - Launching is left to the caller so a readiness timeout can still be
//!   followed by a shutdown of the half-started worker

use std::io::ErrorKind;

use tokio::fs;

use crate::config::SupervisorConfig;
use crate::error::{Result, SupervisorError};
use crate::process::Supervisor;

/// Build a supervisor from settings and write its FPM config.
pub async fn prepare(config: &SupervisorConfig) -> Result<Supervisor> {
    let process = config.process.to_process();

    let config_path = process
        .config_file()
        .ok_or(SupervisorError::MissingField("config_file"))?
        .to_path_buf();
    let doc = process.config()?;
    fs::write(&config_path, doc.to_string())
        .await
        .map_err(|source| SupervisorError::Io {
            path: config_path.clone(),
            source,
        })?;

    if let Some(pid_file) = process.pid_file() {
        match fs::remove_file(pid_file).await {
            Ok(()) => tracing::warn!(pid_file = %pid_file.display(), "Removed stale pid file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(SupervisorError::Io {
                    path: pid_file.to_path_buf(),
                    source,
                })
            }
        }
    }

    tracing::info!(
        name = %process.name(),
        config = %config_path.display(),
        listen = ?process.listen(),
        workers = process.worker(),
        "Supervisor prepared"
    );

    Ok(Supervisor::new(process).with_timeouts(config.timeouts.supervisor_timeouts()))
}
