//! Process supervisor.
//!
//! # Responsibilities
//! - Launch the worker through its daemonizing launcher
//! - Wait for the pid file, then for the listen address to accept
//! - Deliver graceful (SIGINT) or forced (SIGKILL) termination
//! - Wait for the worker to be gone
//!
//! # Start Sequence
//! ```text
//! spawn "<exec> --fpm-config <file> -e" → launcher exits 0
//!     → poll pid file (identity deadline)
//!     → resolve handle
//!     → poll listen address (readiness deadline)
//!     → Ready
//! ```

use std::convert::Infallible;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::descriptor::FpmProcess;
use super::handle::{Liveness, ProcessHandle};
use super::pidfile::read_pid;
use super::state::SupervisorState;
use crate::error::{Result, SupervisorError};
use crate::net::probe::probe;
use crate::net::ListenAddress;
use crate::resilience::poll::{poll_until, Attempt, PollError, PollPolicy, DEFAULT_POLL_INTERVAL};

/// Default bound on pid file acquisition.
pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on reachability polling.
pub const DEFAULT_READINESS_TIMEOUT: Duration = Duration::from_secs(10);

/// Polling interval and deadlines used by [`Supervisor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub poll_interval: Duration,
    /// `None` waits for the pid file forever.
    pub identity: Option<Duration>,
    /// Measured from the first reachability probe.
    pub readiness: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            identity: Some(DEFAULT_IDENTITY_TIMEOUT),
            readiness: DEFAULT_READINESS_TIMEOUT,
        }
    }
}

/// Supervises exactly one worker process.
#[derive(Debug)]
pub struct Supervisor {
    process: FpmProcess,
    timeouts: Timeouts,
    state: SupervisorState,
}

impl Supervisor {
    pub fn new(process: FpmProcess) -> Self {
        Self {
            process,
            timeouts: Timeouts::default(),
            state: SupervisorState::Unstarted,
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn process(&self) -> &FpmProcess {
        &self.process
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    /// Pid of the held process, if any.
    pub fn pid(&self) -> Option<i32> {
        self.state.handle().map(|h| h.pid())
    }

    /// Launch the worker and wait until it accepts connections.
    ///
    /// On [`SupervisorError::ReadinessTimeout`] the handle stays held (state
    /// `TimedOut`) so the caller can still stop the worker.
    ///
    /// Dropping the future before a pid is acquired leaves a state that may
    /// start again. Dropping it while polling reachability keeps the handle.
    pub async fn start(&mut self) -> Result<()> {
        if !self.state.can_start() {
            return Err(SupervisorError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }

        let config_file = self
            .process
            .config_file()
            .ok_or(SupervisorError::MissingField("config_file"))?
            .to_path_buf();
        let pid_file = self
            .process
            .pid_file()
            .ok_or(SupervisorError::MissingField("pid_file"))?
            .to_path_buf();
        let address = self
            .process
            .address()
            .ok_or(SupervisorError::MissingField("listen"))?;

        self.state = SupervisorState::Launching;
        if let Err(e) = self.launch(&config_file).await {
            self.state = SupervisorState::Failed;
            return Err(e);
        }

        self.state = SupervisorState::AwaitingIdentity;
        let handle = match self.await_identity(&pid_file).await {
            Ok(handle) => handle,
            Err(e) => {
                self.state = SupervisorState::Failed;
                return Err(e);
            }
        };

        self.state = SupervisorState::AwaitingReachable(handle);
        match self.await_reachable(&address).await {
            Ok(()) => {
                self.state = SupervisorState::Ready(handle);
                tracing::info!(pid = handle.pid(), address = %address, "Worker ready");
                Ok(())
            }
            Err(e) => {
                self.state = SupervisorState::TimedOut(handle);
                Err(e)
            }
        }
    }

    async fn launch(&self, config_file: &Path) -> Result<()> {
        let exec = self.process.exec();

        tracing::info!(
            exec = %exec.display(),
            config = %config_file.display(),
            "Launching worker"
        );

        let output = Command::new(exec)
            .arg("--fpm-config")
            .arg(config_file)
            .arg("-e")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| SupervisorError::Spawn {
                exec: exec.to_path_buf(),
                source,
            })?;

        // A launcher that forks and exits 0 is the normal daemonizing path.
        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            tracing::error!(status = %output.status, "Worker launcher failed");
            return Err(SupervisorError::Launch {
                status: output.status,
                output: combined,
            });
        }

        tracing::debug!(status = %output.status, "Worker launcher returned");
        Ok(())
    }

    async fn await_identity(&self, pid_file: &Path) -> Result<ProcessHandle> {
        let policy = PollPolicy::new(self.timeouts.poll_interval, self.timeouts.identity);

        let pid = poll_until(policy, move || async move {
            match read_pid(pid_file).await {
                Ok(pid) => Attempt::<i64, Infallible>::Done(pid),
                Err(_) => Attempt::Retry,
            }
        })
        .await
        .map_err(|e| match e {
            PollError::TimedOut(elapsed) => {
                tracing::error!(
                    pid_file = %pid_file.display(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Pid file never became readable"
                );
                SupervisorError::IdentityTimeout {
                    path: pid_file.to_path_buf(),
                    elapsed,
                }
            }
            PollError::Failed(never) => match never {},
        })?;

        let handle = ProcessHandle::from_raw(pid)?;
        tracing::debug!(pid = handle.pid(), "Worker pid acquired");
        Ok(handle)
    }

    async fn await_reachable(&self, address: &ListenAddress) -> Result<()> {
        let policy = PollPolicy::bounded(self.timeouts.poll_interval, self.timeouts.readiness);

        poll_until(policy, move || async move {
            match probe(address).await {
                Ok(()) => Attempt::<(), Infallible>::Done(()),
                Err(_) => Attempt::Retry,
            }
        })
        .await
        .map_err(|e| match e {
            PollError::TimedOut(elapsed) => {
                tracing::error!(
                    address = %address,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Worker not reachable before deadline"
                );
                SupervisorError::ReadinessTimeout {
                    address: address.to_string(),
                    elapsed,
                }
            }
            PollError::Failed(never) => match never {},
        })
    }

    fn signal_target(&self) -> Result<ProcessHandle> {
        self.state.handle().ok_or(SupervisorError::NotRunning)
    }

    /// Send SIGINT. Does not wait for the worker to exit.
    pub fn stop(&mut self) -> Result<()> {
        let handle = self.signal_target()?;
        handle.interrupt()?;
        self.state = SupervisorState::Stopping(handle);
        tracing::info!(pid = handle.pid(), "Sent interrupt to worker");
        Ok(())
    }

    /// Send SIGKILL. Does not wait for the worker to exit.
    pub fn kill(&mut self) -> Result<()> {
        let handle = self.signal_target()?;
        handle.kill()?;
        self.state = SupervisorState::Stopping(handle);
        tracing::warn!(pid = handle.pid(), "Sent kill to worker");
        Ok(())
    }

    /// Wait until the worker is gone. Never signals it.
    pub async fn wait(&mut self) -> Result<()> {
        self.wait_with(None).await
    }

    /// Like [`Supervisor::wait`], giving up after `deadline` with
    /// [`SupervisorError::WaitTimeout`].
    pub async fn wait_timeout(&mut self, deadline: Duration) -> Result<()> {
        self.wait_with(Some(deadline)).await
    }

    async fn wait_with(&mut self, deadline: Option<Duration>) -> Result<()> {
        if self.state == SupervisorState::Exited {
            return Ok(());
        }
        let handle = self.signal_target()?;
        let policy = PollPolicy::new(self.timeouts.poll_interval, deadline);

        let result = poll_until(policy, move || async move {
            match handle.liveness() {
                Ok(Liveness::Alive) => Attempt::Retry,
                Ok(Liveness::Exited) => Attempt::Done(()),
                Err(errno) => Attempt::Fail(errno),
            }
        })
        .await;

        match result {
            Ok(()) => {
                self.state = SupervisorState::Exited;
                tracing::info!(pid = handle.pid(), "Worker exited");
                Ok(())
            }
            Err(PollError::Failed(errno)) => Err(SupervisorError::Signal {
                pid: handle.pid(),
                errno,
            }),
            Err(PollError::TimedOut(elapsed)) => Err(SupervisorError::WaitTimeout {
                pid: handle.pid(),
                elapsed,
            }),
        }
    }
}
