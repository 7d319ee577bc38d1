//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! pid file read / reachability probe / liveness probe
//!     → poll.rs (retry at a fixed interval until done, failed or deadline)
//! ```
//!
//! # Design Decisions
//! - One polling primitive for every wait so intervals stay consistent
//! - Deadlines are optional; an unbounded poll is an explicit choice
//! - A deadline cancels the in-flight attempt too

pub mod poll;

pub use poll::{poll_until, Attempt, PollError, PollPolicy};
