//! FPM configuration subsystem.
//!
//! # Data Flow
//! ```text
//! FpmProcess (descriptor)
//!     → builder.rs (two-section document: global + www pool)
//!     → document.rs (ordered INI-style key/value document)
//!     → save_to(config_file) → read by the worker at startup
//! ```
//!
//! # Design Decisions
//! - The pool always runs `pm = static` with `pm.max_children` workers
//! - The listen value is written raw; the supervisor resolves it separately
//! - Construction errors are surfaced, never repaired

pub mod builder;
pub mod document;

pub use builder::{build_config, DefaultPaths};
pub use document::{DocumentError, FpmConfig, Section};
