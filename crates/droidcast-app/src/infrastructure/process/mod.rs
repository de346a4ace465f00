//! Subprocess invocation for the external debug-bridge and mirroring tools.
//!
//! Every operation in the system is exactly one external process invocation.
//! Arguments are always passed as a discrete argv vector — never interpolated
//! into a shell string — so user-supplied values (host:port, pairing codes,
//! free-form mirror options) cannot alter which command runs.
//!
//! # Testability
//!
//! The [`CommandRunner`] trait allows unit and integration tests to script
//! tool output without spawning real processes; see [`mock::ScriptedRunner`].
//!
//! # No timeouts, no cancellation
//!
//! A runner call resolves only when the subprocess exits.  A hung tool blocks
//! its corresponding request indefinitely; mirror sessions in particular are
//! expected to run for the lifetime of the scrcpy window.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

pub mod mock;

/// Captured output streams of a completed tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Full standard output, untrimmed.
    pub stdout: String,
    /// Full standard error, untrimmed.  Populated on success too — adb logs
    /// daemon startup noise here.
    pub stderr: String,
}

/// Error type for external tool invocations.
///
/// These are the only two failure conditions any operation surfaces: the
/// process could not be spawned, or it exited non-zero.  Failures are never
/// retried and never classified further — a pairing rejection and a malformed
/// argument look the same to the caller beyond the message text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The executable could not be started at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited with a non-zero status.  The message is
    /// the tool's captured error stream.
    #[error("{program} failed: {stderr}")]
    Failed { program: String, stderr: String },
}

/// Trait abstracting external process execution.
///
/// The production implementation is [`SystemRunner`]; tests use
/// [`mock::ScriptedRunner`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, waits for it to exit, and captures both
    /// output streams.
    ///
    /// # Errors
    ///
    /// [`ToolError::Spawn`] if the process cannot be started,
    /// [`ToolError::Failed`] if it exits non-zero.
    async fn run(&self, program: &Path, args: &[String]) -> Result<ToolOutput, ToolError>;
}

/// Production [`CommandRunner`] over `tokio::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ToolOutput, ToolError> {
        debug!(program = %program.display(), ?args, "running external tool");

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ToolError::Failed {
                program: program.display().to_string(),
                stderr,
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}
