use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ai: AIConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AIConfig {
    pub provider: AIProvider,
    pub model: String,
    pub max_tokens: u32,
    pub max_retries: u32,
    /// Scheme and host of the API, without the endpoint path.
    pub api_base: Option<String>,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            provider: AIProvider::OpenAI,
            model: AIProvider::OpenAI.default_model().to_string(),
            max_tokens: 1024,
            max_retries: 3,
            api_base: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AIProvider {
    #[value(name = "openai")]
    OpenAI,
    #[value(name = "anthropic")]
    Anthropic,
}

impl AIProvider {
    pub fn default_model(self) -> &'static str {
        match self {
            AIProvider::OpenAI => "gpt-4",
            AIProvider::Anthropic => "claude-3-5-sonnet-20240620",
        }
    }

    pub fn default_api_base(self) -> &'static str {
        match self {
            AIProvider::OpenAI => "https://api.openai.com",
            AIProvider::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Environment variable holding the credential for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            AIProvider::OpenAI => "OPENAI_API_KEY",
            AIProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_output: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color_output: true }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Loads `path` when it exists and falls back to the built-in defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(?path, "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Switching provider without naming a model picks that provider's default model.
    pub fn apply_overrides(&mut self, provider: Option<AIProvider>, model: Option<String>) {
        if let Some(provider) = provider {
            if provider != self.ai.provider && model.is_none() {
                self.ai.model = provider.default_model().to_string();
            }
            self.ai.provider = provider;
        }
        if let Some(model) = model {
            self.ai.model = model;
        }
    }

    pub fn api_base(&self) -> &str {
        self.ai
            .api_base
            .as_deref()
            .unwrap_or_else(|| self.ai.provider.default_api_base())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "gitgen", "gitgen")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
