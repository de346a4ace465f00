//! External tool location and the fatal startup check.
//!
//! The application ships with a tools directory containing the debug-bridge
//! (`adb`) and mirroring (`scrcpy`) executables, platform-suffixed on
//! Windows.  Both must be present before any bridge command can work, so
//! their absence is a fatal startup condition reported with the specific
//! missing names.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for the startup tool check.
#[derive(Debug, Error)]
pub enum StartupError {
    /// One or both required executables are absent from the tools directory.
    #[error(
        "missing required executables in {}: {} — place them in the tools directory and restart",
        dir.display(),
        missing.join(", ")
    )]
    MissingTools { dir: PathBuf, missing: Vec<String> },
}

/// Resolved filesystem locations of the two external tools.
///
/// Constructed once at startup from the configured tools directory and passed
/// by reference into the components that need it — there is no ambient
/// process-wide lookup.
#[derive(Debug, Clone)]
pub struct ToolPaths {
    /// Directory both executables live in.
    pub dir: PathBuf,
    /// Debug-bridge executable (`adb` / `adb.exe`).
    pub adb: PathBuf,
    /// Mirroring executable (`scrcpy` / `scrcpy.exe`).
    pub scrcpy: PathBuf,
}

impl ToolPaths {
    /// Derives both executable paths inside `dir`.
    pub fn resolve(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            adb: dir.join(exe_name("adb")),
            scrcpy: dir.join(exe_name("scrcpy")),
        }
    }

    /// Verifies both executables exist on disk.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::MissingTools`] naming each absent executable.
    pub fn check_required(&self) -> Result<(), StartupError> {
        let mut missing = Vec::new();
        if !self.adb.exists() {
            missing.push(exe_name("adb"));
        }
        if !self.scrcpy.exists() {
            missing.push(exe_name("scrcpy"));
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(StartupError::MissingTools {
                dir: self.dir.clone(),
                missing,
            })
        }
    }
}

/// Appends the platform executable suffix.
fn exe_name(base: &str) -> String {
    if cfg!(target_os = "windows") {
        format!("{base}.exe")
    } else {
        base.to_string()
    }
}
