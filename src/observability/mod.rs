//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! supervisor, lifecycle, config
//!     → tracing events with structured fields (pid, address, elapsed_ms)
//!     → logging.rs (filter + fmt or JSON layer)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
