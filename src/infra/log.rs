//! File-backed error log under `.pathshala/errors/`.
//!
//! Failures here are swallowed: logging must never take the app down.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::constants::{ERRORS_DIR, STORE_DIR};

/// Append a timestamped line to `errors/app.log` under the store directory.
pub fn log_error(msg: &str) {
    log_error_to(Path::new(STORE_DIR), msg);
}

pub fn log_error_to(store_dir: &Path, msg: &str) {
    let dir = store_dir.join(ERRORS_DIR);
    let _ = fs::create_dir_all(&dir);
    let line = format!("[{}] {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), msg);
    let _ = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("app.log"))
        .and_then(|mut f| f.write_all(line.as_bytes()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        log_error_to(dir.path(), "first failure");
        log_error_to(dir.path(), "second failure");
        let content = fs::read_to_string(dir.path().join(ERRORS_DIR).join("app.log")).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("first failure"));
    }
}
