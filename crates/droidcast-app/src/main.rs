//! Droidcast backend entry point.
//!
//! Wires together the infrastructure services and starts the Tokio async
//! runtime.  In the full desktop build the UI shell is created here and the
//! bridge commands in `infrastructure::ui_bridge` are registered with it.
//!
//! # Startup sequence
//!
//! ```text
//! main()
//!  └─ load_config()          -- TOML config, defaults on first run
//!  └─ ToolPaths::resolve()   -- adb/scrcpy inside the tools directory
//!  └─ check_required()       -- fatal if either executable is missing
//!  └─ RunLog::create()       -- per-run diagnostic log
//!  └─ AppState::new()        -- device directory + session orchestrator
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use droidcast_app::infrastructure::process::SystemRunner;
use droidcast_app::infrastructure::runlog::RunLog;
use droidcast_app::infrastructure::storage::config::{self, load_config};
use droidcast_app::infrastructure::tools::ToolPaths;
use droidcast_app::infrastructure::ui_bridge::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = load_config().unwrap_or_default();

    // Initialise structured logging.  Level is overridden by `RUST_LOG`,
    // falling back to the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.app.log_level.clone())),
        )
        .init();

    info!("Droidcast backend starting");

    // A relative tools dir is resolved against the executable's directory,
    // matching the packaged layout where the tools ship next to the binary.
    let tools_dir = if cfg.tools.dir.is_absolute() {
        cfg.tools.dir.clone()
    } else {
        exe_dir().join(&cfg.tools.dir)
    };
    let tools = ToolPaths::resolve(&tools_dir);

    // ── Per-run diagnostic log ────────────────────────────────────────────────
    let log_dir = config::config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|_| std::env::temp_dir().join("droidcast-logs"));
    let mut runlog = RunLog::create(&log_dir);
    runlog.line(&format!("Tools dir: {}", tools_dir.display()));
    runlog.line(&format!("ADB path: {}", tools.adb.display()));
    runlog.line(&format!("Scrcpy path: {}", tools.scrcpy.display()));
    runlog.line(&format!("Platform: {}", std::env::consts::OS));

    // ── Startup tool check ────────────────────────────────────────────────────
    if let Err(e) = tools.check_required() {
        runlog.line(&format!("Startup check failed: {e}"));
        error!("{e}");
        anyhow::bail!(e);
    }

    let _state: Arc<AppState> = AppState::new(&cfg, tools, Arc::new(SystemRunner));

    // In the full desktop build the UI shell takes over here and routes
    // bridge commands to `_state`.  The headless variant simply blocks until
    // a shutdown signal arrives.
    info!("Droidcast backend ready.  Press Ctrl-C to exit.");
    tokio::signal::ctrl_c().await?;

    info!("Droidcast backend stopped");
    Ok(())
}

/// Directory containing the running executable, falling back to the current
/// directory when it cannot be determined.
fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
