use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{CommandFailure, CommandRunner, ExecutionResult};
use crate::ai::LanguageModel;
use crate::plan::{Plan, Step};
use crate::terminal::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Start,
    AwaitingAnswer,
    Executing,
    Remediating,
    Done,
}

/// Walks a plan in order: asks the user for `Ask` steps, runs `Run` steps and
/// gives every failed command one model-suggested fix.
pub struct PlanExecutor<'a> {
    model: Arc<dyn LanguageModel>,
    runner: Arc<dyn CommandRunner>,
    terminal: &'a mut dyn Terminal,
    dry_run: bool,
    state: ExecutionState,
}

impl<'a> PlanExecutor<'a> {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        runner: Arc<dyn CommandRunner>,
        terminal: &'a mut dyn Terminal,
        dry_run: bool,
    ) -> Self {
        Self {
            model,
            runner,
            terminal,
            dry_run,
            state: ExecutionState::Start,
        }
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Runs every step once. Command failures never stop the plan; the only
    /// errors returned come from the terminal.
    pub async fn execute_plan(&mut self, plan: &mut Plan) -> Result<()> {
        for index in 0..plan.len() {
            if let Some(command) = plan.resolved_command(index) {
                self.run_step(&command).await?;
            } else if let Step::Ask { prompt, answer } = &mut plan.steps[index] {
                self.state = ExecutionState::AwaitingAnswer;
                *answer = Some(self.terminal.ask(prompt.as_str())?);
                debug!(step = index + 1, "answer collected");
            }
        }

        self.state = ExecutionState::Done;
        Ok(())
    }

    async fn run_step(&mut self, command: &str) -> Result<()> {
        self.state = ExecutionState::Executing;
        let result = self.execute(command).await?;
        if result.success {
            return Ok(());
        }

        let failure = CommandFailure::new(command, &result);
        info!(command = %failure.command, "command failed, asking for a fix");
        self.remediate(&failure).await
    }

    // One attempt only: whatever the fix does is not looked at again.
    async fn remediate(&mut self, failure: &CommandFailure) -> Result<()> {
        self.state = ExecutionState::Remediating;

        let fix = match self.model.complete(&failure.remediation_prompt()).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!("Could not get a fix for `{}`: {}", failure.command, e);
                return Ok(());
            }
        };

        if fix.is_empty() {
            warn!("Model suggested no fix for `{}`", failure.command);
            return Ok(());
        }

        let result = self.execute(&fix).await?;
        debug!(success = result.success, "fix finished");
        Ok(())
    }

    async fn execute(&mut self, command: &str) -> Result<ExecutionResult> {
        self.terminal.echo_command(command)?;

        if self.dry_run {
            return Ok(ExecutionResult::dry_run());
        }
        Ok(self.runner.run(command).await)
    }
}
