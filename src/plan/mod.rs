//! Steps the model proposes and how they are read out of its reply.

use serde_json::Value;

mod schema;

pub use schema::{PlanSchema, StepRecord};
use crate::error::GitgenError;

/// Marker in a `run` command that stands for the latest `ask` answer.
pub const PLACEHOLDER: &str = "<user_input>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Ask the user something. `answer` is filled in once they reply.
    Ask { prompt: String, answer: Option<String> },
    Run { command: String },
}

impl Step {
    pub fn ask(prompt: impl Into<String>) -> Self {
        Step::Ask { prompt: prompt.into(), answer: None }
    }

    pub fn run(command: impl Into<String>) -> Self {
        Step::Run { command: command.into() }
    }
}

fn is_populated(field: &Option<String>) -> bool {
    field.as_deref().map_or(false, |s| !s.trim().is_empty())
}

impl TryFrom<StepRecord> for Step {
    type Error = String;

    fn try_from(record: StepRecord) -> Result<Self, Self::Error> {
        match record.action.trim().to_ascii_lowercase().as_str() {
            "ask" => {
                if is_populated(&record.cmd) {
                    return Err("an ask step must not carry a cmd".to_string());
                }
                let prompt = record.prompt.ok_or("an ask step needs a prompt")?;
                Ok(Step::ask(prompt))
            }
            "run" => {
                if is_populated(&record.prompt) {
                    return Err("a run step must not carry a prompt".to_string());
                }
                let command = record.cmd.ok_or("a run step needs a cmd")?;
                Ok(Step::run(command))
            }
            other => Err(format!("unknown action {:?}", other)),
        }
    }
}

/// Ordered steps for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Reads a plan out of a model reply.
    ///
    /// The reply is tried as JSON first. When that fails, the first balanced
    /// object with a `steps` key is pulled out of the surrounding text, so code
    /// fences and chatter around the JSON are tolerated. Anything else is a
    /// `MalformedPlan` carrying the reply verbatim.
    pub fn parse(raw: &str) -> Result<Self, GitgenError> {
        let malformed = |reason: String| GitgenError::MalformedPlan {
            raw: raw.to_string(),
            reason,
        };

        let trimmed = raw.trim();
        let schema: PlanSchema = match serde_json::from_str(trimmed) {
            Ok(schema) => schema,
            Err(direct) => {
                let json = extract_json(trimmed).ok_or_else(|| malformed(direct.to_string()))?;
                serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?
            }
        };

        let steps = schema
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                Step::try_from(record).map_err(|e| malformed(format!("step {}: {}", i + 1, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { steps })
    }

    /// Answer of the nearest answered `Ask` among the steps before `index`.
    pub fn latest_answer(&self, index: usize) -> Option<&str> {
        self.steps[..index.min(self.steps.len())]
            .iter()
            .rev()
            .find_map(|step| match step {
                Step::Ask { answer: Some(answer), .. } => Some(answer.as_str()),
                _ => None,
            })
    }

    /// The command of the `Run` step at `index` with the placeholder filled in.
    /// `None` for `Ask` steps and out-of-range indices.
    pub fn resolved_command(&self, index: usize) -> Option<String> {
        match self.steps.get(index)? {
            Step::Run { command } => Some(resolve_command(command, self.latest_answer(index))),
            Step::Ask { .. } => None,
        }
    }
}

/// Replaces every [`PLACEHOLDER`] in `command` with `answer`, or with nothing
/// when no answer has been collected yet.
pub fn resolve_command(command: &str, answer: Option<&str>) -> String {
    command.replace(PLACEHOLDER, answer.unwrap_or(""))
}

/// Finds the first balanced JSON object in `text` that has a `steps` key.
pub fn extract_json(text: &str) -> Option<&str> {
    text.char_indices()
        .filter(|&(_, c)| c == '{')
        .filter_map(|(start, _)| balanced_object(&text[start..]))
        .find(|candidate| {
            serde_json::from_str::<Value>(candidate)
                .map(|value| value.get("steps").is_some())
                .unwrap_or(false)
        })
}

// `text` starts with '{'. String contents and escapes are skipped.
fn balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}
