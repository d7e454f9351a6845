use std::sync::Arc;
use tracing::debug;

use crate::ai::LanguageModel;
use crate::error::GitgenError;
use crate::intent::Intent;
use crate::plan::{Plan, PLACEHOLDER};

/// Turns an intent into a plan with one model request.
pub struct Planner {
    model: Arc<dyn LanguageModel>,
}

impl Planner {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn build_prompt(intent: &Intent) -> String {
        format!(
            "Translate this intent into sequential git steps as JSON schema:\n\
             `{{steps: [{{action: 'ask'|'run', cmd?: str, prompt?: str}}]}}`\n\
             Use an ask step with a prompt when you need information from the user. \
             Write {placeholder} in the cmd of a later run step where that answer belongs.\n\
             Reply with the JSON object only.\n\
             Intent: \"{intent}\"",
            placeholder = PLACEHOLDER,
            intent = intent,
        )
    }

    pub async fn plan(&self, intent: &Intent) -> Result<Plan, GitgenError> {
        let response = self.model.complete(&Self::build_prompt(intent)).await?;
        debug!(response = %response, "raw plan response");

        let plan = Plan::parse(&response)?;
        debug!(steps = plan.len(), "plan parsed");
        Ok(plan)
    }
}
