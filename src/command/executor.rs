//! Shell command executor

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

/// Default timeout for a single command
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Default cap on captured bytes per stream
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 30_000;

/// Captured result of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; None when the process never ran or was killed
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutput {
    /// Create a successful output (for tests and fakes)
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            ..Default::default()
        }
    }

    /// Create a failed output (for tests and fakes)
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }

    /// Both streams in one report, stderr after stdout
    pub fn combined(&self) -> String {
        let mut output = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !output.is_empty() {
                output.push_str("\n--- stderr ---\n");
            }
            output.push_str(&self.stderr);
        }
        if self.timed_out {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("[command timed out]");
        }
        output
    }
}

/// Runs a command line in an explicit working directory
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run to completion. Never errors; failures are encoded in the output.
    async fn execute(&self, command_line: &str, working_dir: &Path) -> CommandOutput;
}

/// Executor that runs command lines through `sh -c`
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    timeout: Duration,
    max_output_bytes: usize,
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TIMEOUT_MS), DEFAULT_MAX_OUTPUT_BYTES)
    }
}

impl ShellExecutor {
    pub fn new(timeout: Duration, max_output_bytes: usize) -> Self {
        Self {
            timeout,
            max_output_bytes,
        }
    }

    fn capture(&self, bytes: &[u8]) -> String {
        truncate_output(String::from_utf8_lossy(bytes).into_owned(), self.max_output_bytes)
    }
}

#[async_trait]
impl CommandExecutor for ShellExecutor {
    async fn execute(&self, command_line: &str, working_dir: &Path) -> CommandOutput {
        debug!("Executing `{}` in {}", command_line, working_dir.display());

        let child = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn `{}`: {}", command_line, e);
                return CommandOutput {
                    exit_code: None,
                    stderr: format!("Failed to spawn command: {}", e),
                    ..Default::default()
                };
            }
        };

        // Dropping the wait future on timeout drops the child, which kills it
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => CommandOutput {
                exit_code: output.status.code(),
                stdout: self.capture(&output.stdout),
                stderr: self.capture(&output.stderr),
                timed_out: false,
            },
            Ok(Err(e)) => CommandOutput {
                exit_code: None,
                stderr: format!("Failed to collect command output: {}", e),
                ..Default::default()
            },
            Err(_) => {
                warn!("Command `{}` timed out after {:?}", command_line, self.timeout);
                CommandOutput {
                    exit_code: None,
                    stderr: format!("Command timed out after {}ms", self.timeout.as_millis()),
                    timed_out: true,
                    ..Default::default()
                }
            }
        }
    }
}

/// Truncate at a char boundary, noting how much was dropped
fn truncate_output(mut output: String, max_bytes: usize) -> String {
    if output.len() <= max_bytes {
        return output;
    }
    let total = output.len();
    let mut end = max_bytes;
    while !output.is_char_boundary(end) {
        end -= 1;
    }
    output.truncate(end);
    output.push_str(&format!("\n... [truncated, {} bytes total]", total));
    output
}
