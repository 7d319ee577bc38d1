//! Supervisor descriptor: everything needed to configure and launch one
//! php-fpm compatible worker.

use std::path::{Path, PathBuf};

use crate::error::{Result, SupervisorError};
use crate::fpm::builder::{build_config, DefaultPaths};
use crate::fpm::FpmConfig;
use crate::net::ListenAddress;

/// Run-name used when none is set.
pub const DEFAULT_NAME: &str = "phpfpm";

/// Worker count used when none is set.
pub const DEFAULT_WORKERS: usize = 10;

/// Describes a single-pool FPM process.
///
/// Mutated through setters before launch. Once a [`crate::Supervisor`] owns
/// it, the descriptor is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FpmProcess {
    name: String,
    exec: PathBuf,
    config_file: Option<PathBuf>,
    pid_file: Option<PathBuf>,
    error_log: Option<PathBuf>,
    listen: Option<String>,
    user: Option<String>,
    worker: usize,
}

impl FpmProcess {
    /// Create a descriptor for the given executable.
    pub fn new(exec: impl Into<PathBuf>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            exec: exec.into(),
            config_file: None,
            pid_file: None,
            error_log: None,
            listen: None,
            user: None,
            worker: DEFAULT_WORKERS,
        }
    }

    /// Set the base name for the pid, error log and socket files.
    ///
    /// Only affects paths derived by a later [`FpmProcess::set_datadir`].
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Derive pid file, error log and listen socket under `prefix`.
    pub fn set_datadir(&mut self, prefix: impl AsRef<Path>) {
        let paths = DefaultPaths::derive(prefix.as_ref(), &self.name);
        self.pid_file = Some(paths.pid_file);
        self.error_log = Some(paths.error_log);
        self.listen = Some(paths.listen.to_string_lossy().into_owned());
    }

    pub fn set_worker(&mut self, worker: usize) {
        self.worker = worker;
    }

    /// Set the run-as user. An empty name clears it.
    pub fn set_user(&mut self, user: impl Into<String>) {
        let user = user.into();
        self.user = if user.is_empty() { None } else { Some(user) };
    }

    pub fn set_listen(&mut self, listen: impl Into<String>) {
        self.listen = Some(listen.into());
    }

    pub fn set_pid_file(&mut self, path: impl Into<PathBuf>) {
        self.pid_file = Some(path.into());
    }

    pub fn set_error_log(&mut self, path: impl Into<PathBuf>) {
        self.error_log = Some(path.into());
    }

    pub fn set_config_file(&mut self, path: impl Into<PathBuf>) {
        self.config_file = Some(path.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exec(&self) -> &Path {
        &self.exec
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn pid_file(&self) -> Option<&Path> {
        self.pid_file.as_deref()
    }

    pub fn error_log(&self) -> Option<&Path> {
        self.error_log.as_deref()
    }

    pub fn listen(&self) -> Option<&str> {
        self.listen.as_deref()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Classified listen address, if a listen specification is set.
    pub fn address(&self) -> Option<ListenAddress> {
        self.listen.as_deref().map(ListenAddress::resolve)
    }

    /// Build the FPM config document for this descriptor.
    pub fn config(&self) -> Result<FpmConfig> {
        Ok(build_config(self)?)
    }

    /// Build the config, write it to `path`, and remember `path` as the
    /// config file to launch with.
    pub fn save_config(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.config_file = Some(path.clone());

        let doc = self.config()?;
        doc.save_to(&path)
            .map_err(|source| SupervisorError::Io { path, source })?;

        tracing::debug!(
            path = ?self.config_file,
            name = %self.name,
            "FPM config written"
        );
        Ok(())
    }
}
