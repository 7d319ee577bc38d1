//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every path the supervisor needs can be determined
//! - Validate value ranges (workers > 0, intervals and deadlines > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SupervisorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::SupervisorConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &SupervisorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let process = &config.process;
    let has_datadir = process.datadir.is_some();

    if process.exec.as_os_str().is_empty() {
        errors.push(ValidationError::new("process.exec", "must not be empty"));
    }
    if process.name.is_empty() {
        errors.push(ValidationError::new("process.name", "must not be empty"));
    }
    if process.worker == 0 {
        errors.push(ValidationError::new("process.worker", "must be at least 1"));
    }
    if process.config_path().is_none() {
        errors.push(ValidationError::new(
            "process.config_file",
            "required when process.datadir is not set",
        ));
    }
    if !has_datadir && process.pid_file.is_none() {
        errors.push(ValidationError::new(
            "process.pid_file",
            "required when process.datadir is not set",
        ));
    }
    if !has_datadir && process.listen.is_none() {
        errors.push(ValidationError::new(
            "process.listen",
            "required when process.datadir is not set",
        ));
    }
    if matches!(&process.listen, Some(listen) if listen.is_empty()) {
        errors.push(ValidationError::new("process.listen", "must not be empty"));
    }

    let timeouts = &config.timeouts;
    if timeouts.poll_interval_ms == 0 {
        errors.push(ValidationError::new("timeouts.poll_interval_ms", "must be greater than 0"));
    }
    if timeouts.readiness_secs == 0 {
        errors.push(ValidationError::new("timeouts.readiness_secs", "must be greater than 0"));
    }
    if timeouts.shutdown_grace_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.shutdown_grace_secs",
            "must be greater than 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid() -> SupervisorConfig {
        let mut config = SupervisorConfig::default();
        config.process.datadir = Some(PathBuf::from("/tmp/app"));
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SupervisorConfig::default();
        config.process.worker = 0;
        config.timeouts.poll_interval_ms = 0;
        config.timeouts.shutdown_grace_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "process.worker",
                "process.config_file",
                "process.pid_file",
                "process.listen",
                "timeouts.poll_interval_ms",
                "timeouts.shutdown_grace_secs",
            ]
        );
    }

    #[test]
    fn test_explicit_paths_without_datadir() {
        let mut config = SupervisorConfig::default();
        config.process.config_file = Some(PathBuf::from("/etc/fpm.conf"));
        config.process.pid_file = Some(PathBuf::from("/run/fpm.pid"));
        config.process.listen = Some("9000".into());
        assert!(validate_config(&config).is_ok());

        config.process.listen = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].to_string(), "process.listen: must not be empty");
    }
}
