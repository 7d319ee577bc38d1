//! Supervisor for a single php-fpm compatible FastCGI worker.

pub mod config;
pub mod error;
pub mod fpm;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod process;
pub mod resilience;

pub use config::SupervisorConfig;
pub use error::SupervisorError;
pub use fpm::FpmConfig;
pub use net::{ListenAddress, Transport};
pub use process::{FpmProcess, Supervisor, SupervisorState};
