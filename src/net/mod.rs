//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listen specification ("127.0.0.1:9000" | "9000" | "/run/fpm.sock")
//!     → address.rs (classify into transport + address)
//!     → probe.rs (dial once, drop the connection)
//!     → readiness signal for the supervisor
//! ```
//!
//! # Design Decisions
//! - Classification never fails; unknown shapes are unix socket paths
//! - The raw specification goes to the worker, the resolved form to the probe
//! - Probe connections are never reused

pub mod address;
pub mod probe;

pub use address::{ListenAddress, Transport};
