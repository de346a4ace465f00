//! Device Directory Service: enumerates attached Android devices.
//!
//! Runs the debug bridge's long-form device listing and hands the raw stdout
//! to the `droidcast-core` parser.  The device list is rebuilt from scratch on
//! every request — nothing is cached or persisted.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use droidcast_core::{parse_device_listing, AndroidDevice};

use crate::infrastructure::process::{CommandRunner, ToolError};

/// Lists attached devices via `adb devices -l`.
pub struct DeviceDirectory {
    runner: Arc<dyn CommandRunner>,
    adb: PathBuf,
}

impl DeviceDirectory {
    /// Creates a directory service over the given runner and adb path.
    pub fn new(runner: Arc<dyn CommandRunner>, adb: PathBuf) -> Self {
        Self { runner, adb }
    }

    /// Returns one record per authorized attached device, in listing order.
    ///
    /// No devices attached is a successful empty listing, not an error.
    ///
    /// # Errors
    ///
    /// [`ToolError`] if the debug bridge cannot be invoked or exits non-zero.
    pub async fn list_devices(&self) -> Result<Vec<AndroidDevice>, ToolError> {
        let output = self
            .runner
            .run(&self.adb, &["devices".to_string(), "-l".to_string()])
            .await?;

        debug!(raw = %output.stdout, "device listing output");
        let devices = parse_device_listing(&output.stdout);
        info!(count = devices.len(), "devices found");
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::mock::ScriptedRunner;
    use droidcast_core::ConnectionMode;

    fn make_directory(runner: Arc<ScriptedRunner>) -> DeviceDirectory {
        DeviceDirectory::new(runner, PathBuf::from("/tools/adb"))
    }

    #[tokio::test]
    async fn test_list_devices_invokes_long_form_listing() {
        // Arrange
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_ok("List of devices attached\n");
        let directory = make_directory(Arc::clone(&runner));

        // Act
        directory.list_devices().await.unwrap();

        // Assert
        let invocations = runner.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].program, "/tools/adb");
        assert_eq!(invocations[0].args, vec!["devices", "-l"]);
    }

    #[tokio::test]
    async fn test_list_devices_parses_single_usb_device() {
        // Arrange: the canonical single-device listing.
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_ok("List of devices attached\nXYZ123\tdevice usb:1-1 model:Pixel_6 device:raven\n");
        let directory = make_directory(Arc::clone(&runner));

        // Act
        let devices = directory.list_devices().await.unwrap();

        // Assert
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "XYZ123");
        assert_eq!(devices[0].model, "Pixel_6");
        assert_eq!(devices[0].status, "device");
        assert_eq!(devices[0].connection_mode, ConnectionMode::Usb);
    }

    #[tokio::test]
    async fn test_list_devices_with_no_output_is_empty_success() {
        // Arrange
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_ok("");
        let directory = make_directory(Arc::clone(&runner));

        // Act
        let devices = directory.list_devices().await.unwrap();

        // Assert
        assert!(devices.is_empty());
    }

    #[tokio::test]
    async fn test_list_devices_propagates_tool_failure() {
        // Arrange
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_err("cannot connect to daemon");
        let directory = make_directory(Arc::clone(&runner));

        // Act
        let result = directory.list_devices().await;

        // Assert: the stderr text travels with the error.
        match result {
            Err(ToolError::Failed { stderr, .. }) => {
                assert_eq!(stderr, "cannot connect to daemon");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
