//! Configuration schema definitions.
//!
//! This module defines the settings file for the supervisor.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::process::descriptor::{FpmProcess, DEFAULT_NAME, DEFAULT_WORKERS};
use crate::process::Timeouts;

/// Root configuration for the supervisor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SupervisorConfig {
    /// The worker process to generate config for and launch.
    pub process: ProcessConfig,

    /// Polling and deadline settings.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Worker process settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// Path to the php-fpm (or compatible) executable.
    pub exec: PathBuf,

    /// Base name for the pid, error log and socket files.
    pub name: String,

    /// Directory to derive pid file, error log and listen socket from.
    pub datadir: Option<PathBuf>,

    /// Where the generated FPM config is written.
    pub config_file: Option<PathBuf>,

    /// Overrides the derived pid file.
    pub pid_file: Option<PathBuf>,

    /// Overrides the derived error log.
    pub error_log: Option<PathBuf>,

    /// Overrides the derived listen socket ("ip:port", "port" or a path).
    pub listen: Option<String>,

    /// Number of static workers in the pool.
    pub worker: usize,

    /// Run-as user for the pool workers.
    pub user: Option<String>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            exec: PathBuf::from("php-fpm"),
            name: DEFAULT_NAME.to_string(),
            datadir: None,
            config_file: None,
            pid_file: None,
            error_log: None,
            listen: None,
            worker: DEFAULT_WORKERS,
            user: None,
        }
    }
}

impl ProcessConfig {
    /// Config file path, defaulting to `<datadir>/<name>.conf`.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config_file.clone().or_else(|| {
            self.datadir
                .as_ref()
                .map(|dir| dir.join(format!("{}.conf", self.name)))
        })
    }

    /// Build the descriptor: datadir defaults first, explicit paths override.
    pub fn to_process(&self) -> FpmProcess {
        let mut process = FpmProcess::new(&self.exec);
        process.set_name(&self.name);
        if let Some(dir) = &self.datadir {
            process.set_datadir(dir);
        }
        if let Some(path) = self.config_path() {
            process.set_config_file(path);
        }
        if let Some(path) = &self.pid_file {
            process.set_pid_file(path);
        }
        if let Some(path) = &self.error_log {
            process.set_error_log(path);
        }
        if let Some(listen) = &self.listen {
            process.set_listen(listen);
        }
        if let Some(user) = &self.user {
            process.set_user(user);
        }
        process.set_worker(self.worker);
        process
    }
}

/// Polling and deadline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Interval between pid file reads, probes and liveness checks.
    pub poll_interval_ms: u64,

    /// Deadline for the pid file to appear. 0 waits forever.
    pub identity_secs: u64,

    /// Deadline for the listen address to accept a connection.
    pub readiness_secs: u64,

    /// Time allowed between SIGINT and SIGKILL on shutdown.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2,
            identity_secs: 10,
            readiness_secs: 10,
            shutdown_grace_secs: 10,
        }
    }
}

impl TimeoutConfig {
    pub fn supervisor_timeouts(&self) -> Timeouts {
        Timeouts {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            identity: match self.identity_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            readiness: Duration::from_secs(self.readiness_secs),
        }
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when RUST_LOG is unset.
    pub log_level: String,

    /// Emit JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
