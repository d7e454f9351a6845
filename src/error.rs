use std::fmt;
use crate::ai::AIError;

/// Failures that end an invocation.
#[derive(Debug)]
pub enum GitgenError {
    /// No usable credential in the environment.
    Credential(String),
    EmptyIntent,
    /// The model answered, but not with a step list. `raw` is the untouched response.
    MalformedPlan { raw: String, reason: String },
    Model(AIError),
}

impl fmt::Display for GitgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credential(msg) => write!(f, "Credential error: {}", msg),
            Self::EmptyIntent => write!(f, "Intent must not be empty"),
            Self::MalformedPlan { reason, .. } => write!(f, "Malformed plan: {}", reason),
            Self::Model(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GitgenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AIError> for GitgenError {
    fn from(error: AIError) -> Self {
        GitgenError::Model(error)
    }
}
