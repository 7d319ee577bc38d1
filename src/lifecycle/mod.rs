//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Write FPM config → Supervisor
//!
//! Shutdown (shutdown.rs):
//!     SIGINT to worker → Wait (grace period) → SIGKILL → Wait
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then launch, then readiness
//! - Shutdown has timeout: forced kill after deadline

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::graceful_shutdown;
pub use signals::ShutdownSignals;
pub use startup::prepare;
