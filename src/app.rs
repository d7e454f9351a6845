use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::debug;

use crate::ai::LanguageModel;
use crate::error::GitgenError;
use crate::executor::{CommandRunner, PlanExecutor};
use crate::intent::Intent;
use crate::planner::Planner;
use crate::terminal::Console;

/// Plans `intent`, executes the plan and prints the success marker.
///
/// A reply that is not a plan is shown raw and ends the run without error and
/// without executing anything. Backend failures and closed input are returned.
pub async fn run<R: BufRead, W: Write>(
    model: Arc<dyn LanguageModel>,
    runner: Arc<dyn CommandRunner>,
    console: &mut Console<R, W>,
    intent: &Intent,
    dry_run: bool,
) -> Result<()> {
    let mut plan = match Planner::new(model.clone()).plan(intent).await {
        Ok(plan) => plan,
        Err(GitgenError::MalformedPlan { raw, reason }) => {
            debug!(%reason, "plan rejected");
            console.report_malformed_plan(&raw)?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    PlanExecutor::new(model, runner, console, dry_run)
        .execute_plan(&mut plan)
        .await?;

    console.done()?;
    Ok(())
}
