//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SupervisorConfig (validated, immutable)
//!     → ProcessConfig::to_process() → FpmProcess descriptor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A datadir supplies default paths; explicit paths override it

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::SupervisorConfig;
pub use schema::ProcessConfig;
pub use schema::TimeoutConfig;
pub use schema::ObservabilityConfig;
