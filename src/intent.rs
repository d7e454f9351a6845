use std::fmt;
use crate::error::GitgenError;

/// What the user asked for, as one line of free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent(String);

impl Intent {
    pub fn new(text: impl Into<String>) -> Result<Self, GitgenError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GitgenError::EmptyIntent);
        }
        Ok(Self(text))
    }

    /// Joins command-line words with single spaces.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self, GitgenError> {
        let text = words
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
