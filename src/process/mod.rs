//! Process supervision subsystem.
//!
//! # Data Flow
//! ```text
//! descriptor.rs (FpmProcess: paths, listen, workers, user)
//!     → supervisor.rs (launch, readiness, stop, wait)
//!         → pidfile.rs (read daemon pid)
//!         → handle.rs (signals and liveness on that pid)
//!         → state.rs (explicit lifecycle state)
//! ```
//!
//! # Design Decisions
//! - One worker per supervisor; the handle lives inside the state
//! - The launcher is expected to daemonize; its exit status only matters
//!   when it is unsuccessful
//! - Liveness is read from the errno of a null signal, not from messages

pub mod descriptor;
pub mod handle;
pub mod pidfile;
pub mod state;
pub mod supervisor;

pub use descriptor::FpmProcess;
pub use handle::{Liveness, ProcessHandle};
pub use state::SupervisorState;
pub use supervisor::{Supervisor, Timeouts};
