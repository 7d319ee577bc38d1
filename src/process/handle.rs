//! OS process handle resolved from the pid file.

use std::fmt;

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;

use crate::error::{Result, SupervisorError};

/// Result of a liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    Exited,
}

/// Handle to a process the supervisor did not necessarily spawn itself.
///
/// The launcher usually forks and exits, so this refers to the daemon pid
/// read from the pid file rather than to a child of ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    pid: Pid,
}

impl ProcessHandle {
    /// Resolve a pid read from disk.
    ///
    /// Zero and negative values address process groups under `kill(2)` and
    /// are rejected, as is anything outside the platform pid range.
    pub fn from_raw(pid: i64) -> Result<Self> {
        match i32::try_from(pid) {
            Ok(raw) if raw > 0 => Ok(Self {
                pid: Pid::from_raw(raw),
            }),
            _ => Err(SupervisorError::InvalidPid(pid)),
        }
    }

    pub fn pid(&self) -> i32 {
        self.pid.as_raw()
    }

    /// Request a graceful shutdown (SIGINT).
    pub fn interrupt(&self) -> Result<()> {
        self.signal(Signal::SIGINT)
    }

    /// Force termination (SIGKILL).
    pub fn kill(&self) -> Result<()> {
        self.signal(Signal::SIGKILL)
    }

    fn signal(&self, signal: Signal) -> Result<()> {
        kill(self.pid, signal).map_err(|errno| SupervisorError::Signal {
            pid: self.pid(),
            errno,
        })
    }

    /// Probe with the null signal.
    ///
    /// `ESRCH` means the process is gone; any other errno (for example
    /// `EPERM`) is returned to the caller.
    pub fn liveness(&self) -> std::result::Result<Liveness, Errno> {
        match kill(self.pid, None) {
            Ok(()) => Ok(Liveness::Alive),
            Err(Errno::ESRCH) => Ok(Liveness::Exited),
            Err(errno) => Err(errno),
        }
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid {}", self.pid)
    }
}
