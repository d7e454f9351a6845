use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use crate::ai::{AIError, LanguageModel};
use crate::executor::{CommandRunner, ExecutionResult, ExecutionState, PlanExecutor};
use crate::plan::Plan;
use crate::terminal::Terminal;


/// Replies with canned text, in order, and remembers every prompt it got.
pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, AIError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Self::with_results(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(replies: Vec<Result<String, AIError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, AIError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AIError::APIError("no scripted reply left".to_string())))
    }
}

/// Succeeds with empty output unless told otherwise, and records what ran.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    outcomes: Mutex<HashMap<String, ExecutionResult>>,
    runs: Mutex<Vec<String>>,
}

impl RecordingRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(failures: &[(&str, &str)]) -> Arc<Self> {
        let runner = Self::default();
        {
            let mut outcomes = runner.outcomes.lock().unwrap();
            for (command, output) in failures {
                outcomes.insert(command.to_string(), ExecutionResult::new(false, *output));
            }
        }
        Arc::new(runner)
    }

    pub fn runs(&self) -> Vec<String> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str) -> ExecutionResult {
        self.runs.lock().unwrap().push(command.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .get(command)
            .cloned()
            .unwrap_or_else(|| ExecutionResult::new(true, ""))
    }
}

/// Answers prompts from a script and keeps every echo.
#[derive(Default)]
pub(crate) struct ScriptedTerminal {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub echoes: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Terminal for ScriptedTerminal {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }

    fn echo_command(&mut self, command: &str) -> io::Result<()> {
        self.echoes.push(command.to_string());
        Ok(())
    }
}

pub(crate) struct TestUtils;

impl TestUtils {
    /// Runs `plan` against the fakes and hands back the terminal for inspection.
    pub async fn execute(
        plan: &mut Plan,
        model: Arc<ScriptedModel>,
        runner: Arc<RecordingRunner>,
        answers: &[&str],
        dry_run: bool,
    ) -> ScriptedTerminal {
        let mut terminal = ScriptedTerminal::new(answers);
        {
            let mut executor = PlanExecutor::new(model, runner, &mut terminal, dry_run);
            executor.execute_plan(plan).await.expect("plan execution failed");
            assert_eq!(executor.state(), ExecutionState::Done);
        }
        terminal
    }
}
