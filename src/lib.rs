pub mod ai;
pub mod app;
pub mod config;
pub mod credential;
pub mod error;
pub mod executor;
pub mod intent;
pub mod plan;
pub mod planner;
pub mod shell;
pub mod terminal;
pub mod theme;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use ai::{AIClient, AIError, LanguageModel};
pub use app::run;
pub use config::Config;
pub use error::GitgenError;
pub use executor::{CommandRunner, ExecutionResult, PlanExecutor, ShellRunner};
pub use intent::Intent;
pub use plan::{Plan, Step};
pub use planner::Planner;
pub use shell::ShellType;
