//! FPM config generation.
//!
//! # Document Layout
//! ```text
//! [global]
//! pid = <pid file>
//! error_log = <error log>
//!
//! [www]
//! listen = <raw listen specification>
//! pm = static
//! pm.max_children = <worker count>
//! user = <run-as user>        ; only when configured
//! ```

use std::path::{Path, PathBuf};

use super::document::{DocumentError, FpmConfig};
use crate::process::FpmProcess;

/// Section holding process-wide settings.
pub const GLOBAL_SECTION: &str = "global";

/// The single pool section.
pub const POOL_SECTION: &str = "www";

/// Paths derived from a data directory and a run-name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPaths {
    pub pid_file: PathBuf,
    pub error_log: PathBuf,
    pub listen: PathBuf,
}

impl DefaultPaths {
    /// `<prefix>/<name>.pid`, `<prefix>/<name>.error_log`, `<prefix>/<name>.sock`.
    pub fn derive(prefix: &Path, name: &str) -> Self {
        Self {
            pid_file: prefix.join(format!("{}.pid", name)),
            error_log: prefix.join(format!("{}.error_log", name)),
            listen: prefix.join(format!("{}.sock", name)),
        }
    }
}

fn path_value(path: Option<&Path>) -> String {
    path.map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Build the minimal single-pool config for `process`.
pub fn build_config(process: &FpmProcess) -> Result<FpmConfig, DocumentError> {
    let mut doc = FpmConfig::new();

    let global = doc.new_section(GLOBAL_SECTION)?;
    global.set("pid", path_value(process.pid_file()))?;
    global.set("error_log", path_value(process.error_log()))?;

    let pool = doc.new_section(POOL_SECTION)?;
    pool.set("listen", process.listen().unwrap_or_default())?;
    pool.set("pm", "static")?;
    pool.set("pm.max_children", process.worker().to_string())?;
    if let Some(user) = process.user().filter(|u| !u.is_empty()) {
        pool.set("user", user)?;
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FpmProcess {
        let mut p = FpmProcess::new("/usr/sbin/php-fpm");
        p.set_name("worker");
        p.set_datadir("/tmp/app");
        p.set_worker(4);
        p
    }

    #[test]
    fn test_default_paths() {
        let paths = DefaultPaths::derive(Path::new("/tmp/app"), "worker");
        assert_eq!(paths.pid_file, PathBuf::from("/tmp/app/worker.pid"));
        assert_eq!(paths.error_log, PathBuf::from("/tmp/app/worker.error_log"));
        assert_eq!(paths.listen, PathBuf::from("/tmp/app/worker.sock"));
    }

    #[test]
    fn test_build_without_user() {
        let doc = build_config(&sample()).unwrap();

        let names: Vec<_> = doc.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["global", "www"]);

        let global = doc.section("global").unwrap();
        assert_eq!(global.keys().collect::<Vec<_>>(), vec!["pid", "error_log"]);
        assert_eq!(global.get("pid"), Some("/tmp/app/worker.pid"));
        assert_eq!(global.get("error_log"), Some("/tmp/app/worker.error_log"));

        let www = doc.section("www").unwrap();
        assert_eq!(
            www.keys().collect::<Vec<_>>(),
            vec!["listen", "pm", "pm.max_children"]
        );
        assert_eq!(www.get("listen"), Some("/tmp/app/worker.sock"));
        assert_eq!(www.get("pm"), Some("static"));
        assert_eq!(www.get("pm.max_children"), Some("4"));
        assert_eq!(www.get("user"), None);
    }

    #[test]
    fn test_build_with_user() {
        let mut p = sample();
        p.set_user("www-data");

        let doc = build_config(&p).unwrap();
        assert_eq!(doc.get("www", "user"), Some("www-data"));
        assert_eq!(doc.section("www").unwrap().len(), 4);
    }

    #[test]
    fn test_listen_is_raw_specification() {
        let mut p = sample();
        p.set_listen("9000");

        let doc = build_config(&p).unwrap();
        assert_eq!(doc.get("www", "listen"), Some("9000"));
    }

    #[test]
    fn test_invalid_value_surfaces() {
        let mut p = sample();
        p.set_listen("bad\nvalue");

        let err = build_config(&p).unwrap_err();
        assert!(matches!(err, DocumentError::MultilineValue { .. }));
    }
}
