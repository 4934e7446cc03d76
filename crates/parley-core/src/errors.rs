//! Error types for the chat client
//!
//! Failures are grouped by where they originate: user input rejected by the
//! auth provider, the webhook transport, or the configuration layer. None of
//! them is fatal; the conversation driver turns transport and decode failures
//! into a banner on the session and keeps going.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// A required field was empty. The message is meant to be shown verbatim.
    #[error("{0}")]
    Validation(String),
    #[error("Webhook request failed: {0}")]
    Transport(String),
    #[error("Webhook response could not be decoded: {0}")]
    Decode(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl ChatError {
    /// Whether this failure came from the outbound chat call.
    pub fn is_transport(&self) -> bool {
        matches!(self, ChatError::Transport(_) | ChatError::Decode(_))
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChatError::Decode(err.to_string())
        } else if err.is_timeout() {
            ChatError::Transport(format!("request timed out: {}", err))
        } else {
            ChatError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Decode(err.to_string())
    }
}
