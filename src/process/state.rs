//! Supervisor lifecycle state machine.
//!
//! # State Transitions
//! ```text
//! Unstarted → Launching → AwaitingIdentity → AwaitingReachable → Ready
//!                │               │                  │              │
//!                ▼               ▼                  ▼              ▼
//!              Failed          Failed            TimedOut      Stopping → Exited
//! ```
//!
//! # Design Decisions
//! - The process handle lives inside the states that own one, so an
//!   operation needing a handle cannot run without it
//! - `TimedOut` keeps its handle: the worker may still be running
//! - `Exited` and `Failed` allow a fresh start
//! - `Launching` and `AwaitingIdentity` are only observable after a dropped
//!   Start future. No pid was acquired, so they behave like `Failed`

use std::fmt;

use super::handle::ProcessHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SupervisorState {
    #[default]
    Unstarted,
    /// Launcher spawned, waiting for it to return.
    Launching,
    /// Launcher returned, polling the pid file.
    AwaitingIdentity,
    /// Pid known, polling the listen address.
    AwaitingReachable(ProcessHandle),
    Ready(ProcessHandle),
    /// Interrupt or kill sent, not yet confirmed gone.
    Stopping(ProcessHandle),
    Exited,
    Failed,
    /// Reachability deadline elapsed; the handle is still held.
    TimedOut(ProcessHandle),
}

impl SupervisorState {
    /// The held process handle, if this state owns one.
    pub fn handle(&self) -> Option<ProcessHandle> {
        match self {
            SupervisorState::AwaitingReachable(h)
            | SupervisorState::Ready(h)
            | SupervisorState::Stopping(h)
            | SupervisorState::TimedOut(h) => Some(*h),
            _ => None,
        }
    }

    pub fn can_start(&self) -> bool {
        matches!(
            self,
            SupervisorState::Unstarted
                | SupervisorState::Launching
                | SupervisorState::AwaitingIdentity
                | SupervisorState::Exited
                | SupervisorState::Failed
        )
    }

    /// Whether Stop, Kill or Wait may use the handle.
    ///
    /// `AwaitingReachable` is only observable after a cancelled start, and
    /// the worker it names may be running.
    pub fn can_signal(&self) -> bool {
        self.handle().is_some()
    }

    pub fn name(&self) -> &'static str {
        match self {
            SupervisorState::Unstarted => "unstarted",
            SupervisorState::Launching => "launching",
            SupervisorState::AwaitingIdentity => "awaiting identity",
            SupervisorState::AwaitingReachable(_) => "awaiting reachable",
            SupervisorState::Ready(_) => "ready",
            SupervisorState::Stopping(_) => "stopping",
            SupervisorState::Exited => "exited",
            SupervisorState::Failed => "failed",
            SupervisorState::TimedOut(_) => "timed out",
        }
    }
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle() {
            Some(handle) => write!(f, "{} ({})", self.name(), handle),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_only_in_owning_states() {
        let h = ProcessHandle::from_raw(100).unwrap();
        assert_eq!(SupervisorState::Ready(h).handle(), Some(h));
        assert_eq!(SupervisorState::TimedOut(h).handle(), Some(h));
        assert_eq!(SupervisorState::Unstarted.handle(), None);
        assert_eq!(SupervisorState::Exited.handle(), None);
    }

    #[test]
    fn test_transition_guards() {
        let h = ProcessHandle::from_raw(100).unwrap();

        assert!(SupervisorState::Unstarted.can_start());
        assert!(SupervisorState::Failed.can_start());
        assert!(!SupervisorState::Ready(h).can_start());
        assert!(!SupervisorState::TimedOut(h).can_start());
        assert!(!SupervisorState::AwaitingReachable(h).can_start());

        // Left behind by a cancelled start.
        assert!(SupervisorState::Launching.can_start());
        assert!(SupervisorState::AwaitingIdentity.can_start());
        assert!(!SupervisorState::AwaitingIdentity.can_signal());

        assert!(SupervisorState::Ready(h).can_signal());
        assert!(SupervisorState::AwaitingReachable(h).can_signal());
        assert!(!SupervisorState::Unstarted.can_signal());
        assert!(!SupervisorState::Exited.can_signal());
    }

    #[test]
    fn test_display() {
        let h = ProcessHandle::from_raw(100).unwrap();
        assert_eq!(SupervisorState::Ready(h).to_string(), "ready (pid 100)");
        assert_eq!(SupervisorState::Launching.to_string(), "launching");
    }
}
