//! Per-run diagnostic log file.
//!
//! One append-only text file per run, named after the startup timestamp
//! (`debug-2026-08-27T10-15-30-123Z.log` — colons and dots are replaced so
//! the name is valid on Windows).  Records the resolved tool paths and
//! platform info so support requests can start from a known state.
//!
//! Write failures are reported through `tracing::warn!` and are otherwise
//! ignored: a broken log file must never take the application down.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::warn;

/// Append-only diagnostic log for the current run.
pub struct RunLog {
    path: PathBuf,
    file: Option<File>,
}

impl RunLog {
    /// Creates the log directory and opens a timestamped log file inside it.
    ///
    /// Never fails: on any error the returned log is inert and a warning is
    /// emitted, matching the non-fatal contract.
    pub fn create(dir: &Path) -> Self {
        let timestamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        let path = dir.join(format!("debug-{timestamp}.log"));

        if let Err(e) = std::fs::create_dir_all(dir) {
            warn!(dir = %dir.display(), error = %e, "failed to create log directory");
            return Self { path, file: None };
        }

        let file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open run log");
                None
            }
        };

        let mut log = Self { path, file };
        log.line(&format!("=== Debug log started at {timestamp} ==="));
        log
    }

    /// Appends one line to the log.  Failures are warned about, not returned.
    pub fn line(&mut self, message: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        if let Err(e) = writeln!(file, "{message}") {
            warn!(path = %self.path.display(), error = %e, "failed to write run log");
        }
    }

    /// Path of the log file for this run (whether or not it could be opened).
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("droidcast_runlog_{tag}_{}", std::process::id()))
    }

    #[test]
    fn test_create_writes_header_and_appends_lines() {
        // Arrange
        let dir = temp_log_dir("append");

        // Act
        let mut log = RunLog::create(&dir);
        log.line("ADB path: /tools/adb");
        log.line("Platform: linux");

        // Assert
        let content = std::fs::read_to_string(log.path()).expect("log file must exist");
        assert!(content.starts_with("=== Debug log started at "));
        assert!(content.contains("ADB path: /tools/adb"));
        assert!(content.contains("Platform: linux"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_name_contains_no_colons_or_dots_before_extension() {
        // Arrange / Act
        let dir = temp_log_dir("name");
        let log = RunLog::create(&dir);

        // Assert: only the `.log` extension dot survives sanitisation.
        let name = log.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("debug-"));
        assert!(name.ends_with(".log"));
        assert!(!name.contains(':'));
        assert_eq!(name.matches('.').count(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unwritable_directory_is_non_fatal() {
        // Arrange: a path under a file cannot be created as a directory.
        let dir = temp_log_dir("blocked");
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        // Act: must not panic, and subsequent writes are no-ops.
        let mut log = RunLog::create(&blocker.join("logs"));
        log.line("ignored");

        std::fs::remove_dir_all(&dir).ok();
    }
}
