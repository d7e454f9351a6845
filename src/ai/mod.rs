use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::json;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

mod error;

pub use error::AIError;
use crate::config::{AIProvider, Config};
use crate::credential;
use crate::error::GitgenError;

const INITIAL_RETRY_DELAY: u64 = 1000; // milliseconds
const MAX_RETRY_DELAY: u64 = 10000; // 10 seconds max delay

/// A single-turn, stateless text completion service.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AIError>;
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: u64,
    pub max_delay: u64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: INITIAL_RETRY_DELAY,
            max_delay: MAX_RETRY_DELAY,
        }
    }

    fn get_delay(&self, attempt: u32) -> Duration {
        let delay = self.initial_delay.saturating_mul(2u64.saturating_pow(attempt));
        Duration::from_millis(delay.min(self.max_delay))
    }
}

async fn with_retries<T, F, Fut>(config: &RetryConfig, f: F) -> Result<T, AIError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, AIError>>,
{
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt + 1 < config.max_attempts => {
                let delay = config.get_delay(attempt);
                warn!("Request failed: {}. Retrying in {:?}...", e, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// HTTP client for the configured provider.
pub struct AIClient {
    http: reqwest::Client,
    provider: AIProvider,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
    retry: RetryConfig,
}

impl AIClient {
    pub fn new(config: &Config, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            provider: config.ai.provider,
            api_key,
            api_base: config.api_base().trim_end_matches('/').to_string(),
            model: config.ai.model.clone(),
            max_tokens: config.ai.max_tokens,
            retry: RetryConfig::new(config.ai.max_retries),
        }
    }

    /// Builds a client with the credential for the configured provider, or
    /// fails before anything is sent.
    pub fn from_env(config: &Config) -> Result<Self, GitgenError> {
        let api_key = credential::api_key_from_env(config.ai.provider.api_key_var())?;
        Ok(Self::new(config, api_key))
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn complete_once(&self, prompt: &str) -> Result<String, AIError> {
        match self.provider {
            AIProvider::OpenAI => self.openai_completion(prompt).await,
            AIProvider::Anthropic => self.anthropic_completion(prompt).await,
        }
    }

    async fn openai_completion(&self, prompt: &str) -> Result<String, AIError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| AIError::AuthenticationError(format!("Invalid API key: {}", e)))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let url = format!("{}/v1/chat/completions", self.api_base);
        debug!(%url, model = %self.model, "sending chat completion");

        let response = self.http
            .post(&url)
            .headers(headers)
            .json(&json!({
                "model": &self.model,
                "max_tokens": self.max_tokens,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await?;

        let response_text = check_status(response).await?;

        #[derive(Debug, Deserialize)]
        struct OpenAIResponse {
            choices: Vec<Choice>,
        }

        #[derive(Debug, Deserialize)]
        struct Choice {
            message: Message,
        }

        #[derive(Debug, Deserialize)]
        struct Message {
            #[serde(default)]
            content: Option<String>,
        }

        let parsed: OpenAIResponse = serde_json::from_str(&response_text)?;
        parsed.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AIError::ParseError(format!("Empty response from OpenAI: {}", response_text)))
    }

    async fn anthropic_completion(&self, prompt: &str) -> Result<String, AIError> {
        let mut headers = HeaderMap::new();
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert("x-api-key", HeaderValue::from_str(&self.api_key)
            .map_err(|e| AIError::AuthenticationError(format!("Invalid API key: {}", e)))?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let url = format!("{}/v1/messages", self.api_base);
        debug!(%url, model = %self.model, "sending message");

        let response = self.http
            .post(&url)
            .headers(headers)
            .json(&json!({
                "model": &self.model,
                "max_tokens": self.max_tokens,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await?;

        let response_text = check_status(response).await?;

        #[derive(Debug, Deserialize)]
        struct AnthropicResponse {
            #[serde(default)]
            content: Vec<AnthropicContent>,
        }

        #[derive(Debug, Deserialize)]
        struct AnthropicContent {
            #[serde(default)]
            text: String,
        }

        let parsed: AnthropicResponse = serde_json::from_str(&response_text)?;
        let text: String = parsed.content.into_iter().map(|c| c.text).collect();

        if text.is_empty() {
            return Err(AIError::ParseError(format!("Empty response from Anthropic: {}", response_text)));
        }
        Ok(text)
    }
}

#[async_trait]
impl LanguageModel for AIClient {
    async fn complete(&self, prompt: &str) -> Result<String, AIError> {
        with_retries(&self.retry, || self.complete_once(prompt)).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<String, AIError> {
    match response.status() {
        status if status.is_success() => (),
        StatusCode::TOO_MANY_REQUESTS => {
            return Err(AIError::RateLimitError("Rate limit exceeded".to_string()));
        }
        StatusCode::UNAUTHORIZED => {
            return Err(AIError::AuthenticationError("Invalid API key".to_string()));
        }
        status => {
            let error_body = response.text().await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(AIError::APIError(format!(
                "Unexpected status code: {} - Response: {}",
                status, error_body
            )));
        }
    }

    response.text().await
        .map_err(|e| AIError::NetworkError(format!("Failed to read response body: {}", e)))
}
