//! Session Orchestrator: pairing, connection, wireless mode, and mirroring.
//!
//! Each operation is a single external-process invocation with the inputs
//! passed as discrete argv elements.  Success resolves with the tool's
//! whitespace-trimmed stdout; any spawn failure or non-zero exit propagates
//! as a [`ToolError`] carrying the captured error stream.
//!
//! # Device lifecycle (informal, not enforced)
//!
//! ```text
//! unknown ──► paired ──► connected ──► tcpip-enabled ──► mirroring
//!         pair_device  connect_device   enable_tcpip     start_mirror
//! ```
//!
//! The orchestrator does not enforce these transitions — any operation may be
//! invoked in any order.  The debug bridge itself rejects invalid transitions
//! (e.g. connecting to an unpaired host) and that rejection surfaces as a
//! generic tool failure with no further classification.
//!
//! # Mirror-session registry
//!
//! `start_mirror` is long-lived: it resolves only when the scrcpy process
//! exits.  Active sessions are tracked in a device-keyed registry so a second
//! mirror request for a device that is already mirroring is rejected without
//! spawning a process.  Different devices mirror concurrently as independent
//! subprocesses.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{info, warn};

use crate::infrastructure::process::{CommandRunner, ToolError};
use crate::infrastructure::tools::ToolPaths;

/// Error type for orchestrator operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The underlying tool invocation failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A mirror session for this device is already running.
    #[error("device {device_id} is already mirroring")]
    AlreadyMirroring { device_id: String },
}

/// Sequences debug-bridge and mirroring-tool invocations.
pub struct SessionOrchestrator {
    runner: Arc<dyn CommandRunner>,
    tools: ToolPaths,
    /// TCP port used for the wireless-debugging probe and the `tcpip` command.
    tcpip_port: u16,
    /// Flags prepended to every mirror invocation, whitespace-split.
    default_mirror_options: String,
    /// Device ids with a live scrcpy subprocess.
    active_mirrors: Mutex<HashSet<String>>,
}

impl SessionOrchestrator {
    /// Creates an orchestrator over the given runner and tool paths.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        tools: ToolPaths,
        tcpip_port: u16,
        default_mirror_options: String,
    ) -> Self {
        Self {
            runner,
            tools,
            tcpip_port,
            default_mirror_options,
            active_mirrors: Mutex::new(HashSet::new()),
        }
    }

    /// Pairs with a device over wireless debugging.
    ///
    /// Runs `adb pair <host:port> <code>` and returns the tool's trimmed
    /// confirmation text.
    pub async fn pair_device(
        &self,
        host_port: &str,
        pairing_code: &str,
    ) -> Result<String, ToolError> {
        info!(host_port, "pairing device");
        self.run_adb(&["pair", host_port, pairing_code]).await
    }

    /// Connects to a device endpoint over TCP/IP.
    pub async fn connect_device(&self, host_port: &str) -> Result<String, ToolError> {
        info!(host_port, "connecting device");
        self.run_adb(&["connect", host_port]).await
    }

    /// Disconnects a network-attached device.
    pub async fn disconnect_device(&self, device_id: &str) -> Result<String, ToolError> {
        info!(device_id, "disconnecting device");
        self.run_adb(&["disconnect", device_id]).await
    }

    /// Switches a device's debug bridge to TCP/IP mode.
    ///
    /// Idempotent by design: when the device already reports the configured
    /// port, a fixed already-enabled message is returned and the `tcpip`
    /// command is not issued, so re-invocation after success is a no-op that
    /// still reports success.
    pub async fn enable_tcpip(&self, device_id: &str) -> Result<String, ToolError> {
        if self.check_wireless_debugging(device_id).await {
            return Ok(format!(
                "Wireless debugging is already enabled on port {}",
                self.tcpip_port
            ));
        }

        info!(device_id, port = self.tcpip_port, "enabling tcpip mode");
        let port = self.tcpip_port.to_string();
        self.run_adb(&["-s", device_id, "tcpip", &port]).await
    }

    /// Probes whether the device's debug bridge already listens on the
    /// configured TCP port.
    ///
    /// A failing probe is reported as `false`, never as an error — the caller
    /// then falls through to the real `tcpip` invocation.
    async fn check_wireless_debugging(&self, device_id: &str) -> bool {
        let result = self
            .run_adb(&["-s", device_id, "shell", "getprop", "service.adb.tcp.port"])
            .await;

        match result {
            Ok(value) => value == self.tcpip_port.to_string(),
            Err(e) => {
                warn!(device_id, error = %e, "wireless debugging probe failed");
                false
            }
        }
    }

    /// Starts a mirror session and waits for the scrcpy process to exit.
    ///
    /// The free-form `options` string is whitespace-split and appended after
    /// the configured default options.  There is no way to cancel or signal
    /// the session from here once started; closing the scrcpy window ends it.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyMirroring`] if a session for this device is
    /// live, otherwise any [`ToolError`] from the scrcpy invocation.
    pub async fn start_mirror(&self, device_id: &str, options: &str) -> Result<(), SessionError> {
        {
            let mut active = self.active_mirrors.lock().expect("lock poisoned");
            if !active.insert(device_id.to_string()) {
                return Err(SessionError::AlreadyMirroring {
                    device_id: device_id.to_string(),
                });
            }
        }

        let mut args: Vec<String> = vec!["-s".to_string(), device_id.to_string()];
        args.extend(self.default_mirror_options.split_whitespace().map(String::from));
        args.extend(options.split_whitespace().map(String::from));

        info!(device_id, ?args, "starting mirror session");
        let result = self.runner.run(&self.tools.scrcpy, &args).await;

        // The registry entry must go away however the session ended.
        self.active_mirrors
            .lock()
            .expect("lock poisoned")
            .remove(device_id);

        match result {
            Ok(_) => {
                info!(device_id, "mirror session ended");
                Ok(())
            }
            Err(e) => Err(SessionError::Tool(e)),
        }
    }

    /// Whether a mirror session for this device is currently live.
    pub fn is_mirroring(&self, device_id: &str) -> bool {
        self.active_mirrors
            .lock()
            .expect("lock poisoned")
            .contains(device_id)
    }

    /// Runs the debug bridge with the given argv and trims its stdout.
    async fn run_adb(&self, args: &[&str]) -> Result<String, ToolError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let output = self.runner.run(&self.tools.adb, &args).await?;
        Ok(output.stdout.trim().to_string())
    }
}
