//! Command bridge: exposes application-layer operations to the UI shell.
//!
//! The front-end invokes named commands (`get_devices`, `pair_device`, …)
//! across a request/response bridge; each command function here delegates to
//! the shared [`AppState`] and returns a [`CommandResult`].  The presentation
//! layer is the only consumer of this module; it must NOT be imported by the
//! application layer.
//!
//! # `CommandResult<T>` wrapper
//!
//! All bridge commands return `CommandResult<T>` rather than `Result<T, E>`.
//! This ensures every command response has the same JSON shape:
//! `{ success: bool, data: T | null, error: string | null }`, so the
//! front-end can always check `result.success` without a try/catch around
//! the invoke call.
//!
//! # Concurrency
//!
//! Multiple bridge requests may be in flight at once; each spawns exactly one
//! external process and awaits its completion.  The only mutual exclusion is
//! the mirror-session registry inside the orchestrator — per-device ordering
//! of everything else is caller-determined.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::error;

use droidcast_core::{AndroidDevice, ConnectionMode};

use crate::application::device_directory::DeviceDirectory;
use crate::application::session::SessionOrchestrator;
use crate::infrastructure::process::CommandRunner;
use crate::infrastructure::storage::config::AppConfig;
use crate::infrastructure::tools::ToolPaths;

// ── Shared application state ──────────────────────────────────────────────────

/// Application state shared between bridge command invocations.
///
/// Wrapped in `Arc<>` and handed to every command handler.  The directory and
/// orchestrator are themselves stateless apart from the mirror registry, so
/// no outer mutex is needed — commands for different devices run fully
/// concurrently.
pub struct AppState {
    /// Lists attached devices on demand.
    pub directory: DeviceDirectory,
    /// Sequences pairing, connection, tcpip, and mirror operations.
    pub sessions: SessionOrchestrator,
}

impl AppState {
    /// Builds the state from the loaded configuration and resolved tools.
    pub fn new(config: &AppConfig, tools: ToolPaths, runner: Arc<dyn CommandRunner>) -> Arc<Self> {
        let directory = DeviceDirectory::new(Arc::clone(&runner), tools.adb.clone());
        let sessions = SessionOrchestrator::new(
            runner,
            tools,
            config.mirror.tcpip_port,
            config.mirror.default_options.clone(),
        );

        Arc::new(Self {
            directory,
            sessions,
        })
    }
}

// ── Data Transfer Objects (Presentation layer) ────────────────────────────────

/// DTO representing one attached device returned to the UI.
///
/// Serialized camelCase to match the TypeScript `AndroidDevice` interface on
/// the other side of the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub id: String,
    pub model: String,
    pub status: String,
    /// `"usb"`, `"tcpip"`, or `"unknown"`.
    pub connection_mode: String,
}

impl From<&AndroidDevice> for DeviceDto {
    fn from(d: &AndroidDevice) -> Self {
        let connection_mode = match d.connection_mode {
            ConnectionMode::Usb => "usb",
            ConnectionMode::Tcpip => "tcpip",
            ConnectionMode::Unknown => "unknown",
        };
        Self {
            id: d.id.clone(),
            model: d.model.clone(),
            status: d.status.clone(),
            connection_mode: connection_mode.to_string(),
        }
    }
}

/// Unified response wrapper used by all bridge commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Bridge commands ───────────────────────────────────────────────────────────

/// Lists attached devices.
///
/// # Example (frontend)
/// ```ts
/// const devices = await invoke<DeviceDto[]>('get_devices');
/// ```
pub async fn get_devices(state: Arc<AppState>) -> CommandResult<Vec<DeviceDto>> {
    match state.directory.list_devices().await {
        Ok(devices) => CommandResult::ok(devices.iter().map(DeviceDto::from).collect()),
        Err(e) => {
            error!(error = %e, "get_devices failed");
            CommandResult::err(e.to_string())
        }
    }
}

/// Pairs with a device over wireless debugging.
pub async fn pair_device(
    state: Arc<AppState>,
    host_port: String,
    pairing_code: String,
) -> CommandResult<String> {
    match state.sessions.pair_device(&host_port, &pairing_code).await {
        Ok(output) => CommandResult::ok(output),
        Err(e) => {
            error!(host_port, error = %e, "pair_device failed");
            CommandResult::err(e.to_string())
        }
    }
}

/// Connects to a device endpoint over TCP/IP.
pub async fn connect_device(state: Arc<AppState>, host_port: String) -> CommandResult<String> {
    match state.sessions.connect_device(&host_port).await {
        Ok(output) => CommandResult::ok(output),
        Err(e) => {
            error!(host_port, error = %e, "connect_device failed");
            CommandResult::err(e.to_string())
        }
    }
}

/// Starts a mirror session; resolves when the scrcpy process exits.
pub async fn start_scrcpy(
    state: Arc<AppState>,
    device_id: String,
    options: String,
) -> CommandResult<()> {
    match state.sessions.start_mirror(&device_id, &options).await {
        Ok(()) => CommandResult::ok(()),
        Err(e) => {
            error!(device_id, error = %e, "start_scrcpy failed");
            CommandResult::err(e.to_string())
        }
    }
}

/// Switches a device's debug bridge to TCP/IP mode (idempotent).
pub async fn enable_tcpip(state: Arc<AppState>, device_id: String) -> CommandResult<String> {
    match state.sessions.enable_tcpip(&device_id).await {
        Ok(output) => CommandResult::ok(output),
        Err(e) => {
            error!(device_id, error = %e, "enable_tcpip failed");
            CommandResult::err(e.to_string())
        }
    }
}

/// Disconnects a network-attached device.
pub async fn disconnect_device(state: Arc<AppState>, device_id: String) -> CommandResult<String> {
    match state.sessions.disconnect_device(&device_id).await {
        Ok(output) => CommandResult::ok(output),
        Err(e) => {
            error!(device_id, error = %e, "disconnect_device failed");
            CommandResult::err(e.to_string())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::mock::ScriptedRunner;
    use std::path::Path;

    fn make_state(runner: Arc<ScriptedRunner>) -> Arc<AppState> {
        AppState::new(
            &AppConfig::default(),
            ToolPaths::resolve(Path::new("/tools")),
            runner,
        )
    }

    #[tokio::test]
    async fn test_get_devices_maps_records_to_dtos() {
        // Arrange
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_ok(
            "List of devices attached\n\
             XYZ123\tdevice usb:1-1 model:Pixel_6 device:raven\n\
             192.168.1.5:5555\tdevice model:Pixel_6\n",
        );
        let state = make_state(Arc::clone(&runner));

        // Act
        let result = get_devices(state).await;

        // Assert
        assert!(result.success);
        let devices = result.data.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].connection_mode, "usb");
        assert_eq!(devices[1].connection_mode, "tcpip");
    }

    #[tokio::test]
    async fn test_get_devices_failure_fills_error_field() {
        // Arrange
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_err("cannot connect to daemon");
        let state = make_state(Arc::clone(&runner));

        // Act
        let result = get_devices(state).await;

        // Assert
        assert!(!result.success);
        assert!(result.data.is_none());
        assert!(result.error.unwrap().contains("cannot connect to daemon"));
    }

    #[tokio::test]
    async fn test_pair_device_success_carries_tool_output() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_ok("Successfully paired to 192.168.1.5:37000\n");
        let state = make_state(Arc::clone(&runner));

        let result = pair_device(state, "192.168.1.5:37000".into(), "123456".into()).await;

        assert!(result.success);
        assert_eq!(result.data.unwrap(), "Successfully paired to 192.168.1.5:37000");
    }

    #[tokio::test]
    async fn test_start_scrcpy_resolves_with_unit_on_exit() {
        let runner = Arc::new(ScriptedRunner::new());
        runner.push_ok("");
        let state = make_state(Arc::clone(&runner));

        let result = start_scrcpy(state, "XYZ123".into(), String::new()).await;

        assert!(result.success);
    }

    #[test]
    fn test_device_dto_serializes_camel_case_connection_mode() {
        let dto = DeviceDto::from(&AndroidDevice {
            id: "XYZ123".to_string(),
            model: "Pixel_6".to_string(),
            status: "device".to_string(),
            connection_mode: ConnectionMode::Usb,
        });
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains(r#""connectionMode":"usb""#));
    }

    #[test]
    fn test_command_result_ok_sets_success_true() {
        let r: CommandResult<i32> = CommandResult::ok(42);
        assert!(r.success);
        assert_eq!(r.data.unwrap(), 42);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_command_result_err_sets_success_false() {
        let r: CommandResult<i32> = CommandResult::err("something went wrong");
        assert!(!r.success);
        assert!(r.data.is_none());
        assert_eq!(r.error.unwrap(), "something went wrong");
    }
}
