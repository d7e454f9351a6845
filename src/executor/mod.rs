pub mod chain;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::shell::ShellType;

pub use chain::{ExecutionState, PlanExecutor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    /// stderr when the command wrote any, stdout otherwise.
    pub output: String,
}

impl ExecutionResult {
    pub fn new(success: bool, output: impl Into<String>) -> Self {
        Self { success, output: output.into() }
    }

    /// What a skipped command reports in dry-run mode.
    pub fn dry_run() -> Self {
        Self::new(true, "")
    }

    pub fn from_streams(success: bool, stdout: &str, stderr: &str) -> Self {
        let output = if stderr.is_empty() { stdout } else { stderr };
        Self::new(success, output)
    }
}

/// A `run` step that did not succeed, as handed to remediation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    pub command: String,
    pub output: String,
}

impl CommandFailure {
    pub fn new(command: impl Into<String>, result: &ExecutionResult) -> Self {
        Self {
            command: command.into(),
            output: result.output.clone(),
        }
    }

    /// Prompt asking the model for a single corrective command.
    pub fn remediation_prompt(&self) -> String {
        format!(
            "I ran `{}` and got an error:\n{}\n\
             How can I fix this? Reply with a single git command.",
            self.command, self.output
        )
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> ExecutionResult;
}

/// Runs commands through the platform shell in the current directory.
pub struct ShellRunner {
    shell: ShellType,
}

impl ShellRunner {
    pub fn new(shell: ShellType) -> Self {
        Self { shell }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(ShellType::detect())
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> ExecutionResult {
        let (shell, args) = self.shell.get_shell_command();

        let output = match Command::new(shell).args(args).arg(command).output().await {
            Ok(output) => output,
            Err(e) => {
                debug!(shell = %self.shell, error = %e, "failed to spawn shell");
                return ExecutionResult::new(false, format!("failed to run {}: {}", shell, e));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(shell = %self.shell, status = ?output.status, "command finished");

        ExecutionResult::from_streams(output.status.success(), &stdout, &stderr)
    }
}
