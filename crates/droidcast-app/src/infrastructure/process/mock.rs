//! Scripted command runner for unit and integration testing.
//!
//! Allows tests to script tool output without spawning real `adb` or `scrcpy`
//! processes, and to assert exactly which invocations a use case issued.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CommandRunner, ToolError, ToolOutput};

/// One recorded tool invocation: the program path and its argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// A [`CommandRunner`] that replays queued results in FIFO order.
///
/// Panics if a caller runs more commands than results were scripted — that
/// always indicates a test arranging fewer invocations than the code under
/// test performs.
#[derive(Default)]
pub struct ScriptedRunner {
    results: Mutex<VecDeque<Result<ToolOutput, ToolError>>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    /// Creates a runner with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful invocation result with the given stdout.
    pub fn push_ok(&self, stdout: &str) {
        self.results
            .lock()
            .expect("lock poisoned")
            .push_back(Ok(ToolOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
            }));
    }

    /// Queues a non-zero-exit failure carrying the given stderr.
    pub fn push_err(&self, stderr: &str) {
        self.results
            .lock()
            .expect("lock poisoned")
            .push_back(Err(ToolError::Failed {
                program: "scripted".to_string(),
                stderr: stderr.to_string(),
            }));
    }

    /// Returns every invocation issued so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().expect("lock poisoned").clone()
    }

    /// Returns how many invocations were issued so far.
    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().expect("lock poisoned").len()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ToolOutput, ToolError> {
        self.invocations
            .lock()
            .expect("lock poisoned")
            .push(Invocation {
                program: program.display().to_string(),
                args: args.to_vec(),
            });

        self.results
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .expect("ScriptedRunner ran out of scripted results")
    }
}
