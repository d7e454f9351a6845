use serde::{Deserialize, Serialize};

/// The object the model is asked to return.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanSchema {
    pub steps: Vec<StepRecord>,
}

/// One loosely-shaped step as the model writes it.
#[derive(Debug, Serialize, Deserialize)]
pub struct StepRecord {
    pub action: String,
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}
