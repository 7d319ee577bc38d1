//! Pid file reading.
//!
//! The worker writes its pid after daemonizing, on its own schedule. A
//! missing, empty or half-written file is indistinguishable from "not yet",
//! so every read or parse failure is retried by the caller.

use std::io;
use std::path::Path;

/// Read and parse a decimal pid. Surrounding whitespace is ignored.
pub async fn read_pid(path: &Path) -> io::Result<i64> {
    let content = tokio::fs::read_to_string(path).await?;
    content
        .trim()
        .parse::<i64>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
