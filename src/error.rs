//! Error types for the supervisor.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use nix::errno::Errno;

use crate::fpm::DocumentError;
use crate::process::state::SupervisorState;

/// Errors surfaced by [`crate::Supervisor`] operations.
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    /// A descriptor field required by the operation was never set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The operation is not valid in the current lifecycle state.
    #[error("cannot {operation} while supervisor is {state}")]
    InvalidState {
        operation: &'static str,
        state: SupervisorState,
    },

    /// The FPM config document could not be built.
    #[error("failed to build fpm config: {0}")]
    Document(#[from] DocumentError),

    /// Filesystem error while persisting the FPM config.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The launcher executable could not be spawned at all.
    #[error("failed to spawn {exec}: {source}")]
    Spawn {
        exec: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The launcher ran but reported an unsuccessful exit.
    #[error("unsuccessful exit. error {status}\noutput:\n{output}")]
    Launch { status: ExitStatus, output: String },

    /// The identity (pid) file never became readable.
    #[error("pid file {path} not readable after {elapsed:?}")]
    IdentityTimeout { path: PathBuf, elapsed: Duration },

    /// The identity file held a value that cannot name a process.
    #[error("invalid pid {0} in pid file")]
    InvalidPid(i64),

    /// The worker never accepted a connection before the deadline.
    #[error("time out: {address} not reachable after {elapsed:?}")]
    ReadinessTimeout { address: String, elapsed: Duration },

    /// The worker was still alive when a bounded wait gave up.
    #[error("pid {pid} still running after {elapsed:?}")]
    WaitTimeout { pid: i32, elapsed: Duration },

    /// No process handle is held.
    #[error("no running process")]
    NotRunning,

    /// Signal delivery failed.
    #[error("failed to signal pid {pid}: {errno}")]
    Signal { pid: i32, errno: Errno },
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
