use std::fmt;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum AIError {
    NetworkError(String),
    ParseError(String),
    AuthenticationError(String),
    RateLimitError(String),
    APIError(String),
}

impl AIError {
    /// Transport-level failures that are worth sending again unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::RateLimitError(_))
    }
}

impl fmt::Display for AIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::AuthenticationError(msg) => write!(f, "Authentication error: {}", msg),
            Self::RateLimitError(msg) => write!(f, "Rate limit error: {}", msg),
            Self::APIError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for AIError {}

impl From<JsonError> for AIError {
    fn from(error: JsonError) -> Self {
        AIError::ParseError(format!("Unexpected response body: {}", error))
    }
}

impl From<reqwest::Error> for AIError {
    fn from(error: reqwest::Error) -> Self {
        AIError::NetworkError(error.to_string())
    }
}
