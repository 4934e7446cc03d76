//! Configuration type definitions
//!
//! Every section has defaults, so an empty YAML document is a valid
//! configuration that points at a local webhook.

use crate::errors::ChatError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default = "default_webhook_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: default_webhook_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Artificial latency of the simulated login and register calls.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

/// User-facing texts. `{name}` is replaced with the signed-in user's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_welcome_greeting")]
    pub welcome_greeting: String,
    #[serde(default = "default_reset_greeting")]
    pub reset_greeting: String,
    #[serde(default = "default_connection_error")]
    pub connection_error: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            welcome_greeting: default_welcome_greeting(),
            reset_greeting: default_reset_greeting(),
            connection_error: default_connection_error(),
        }
    }
}

impl ChatConfig {
    pub fn welcome_for(&self, name: &str) -> String {
        self.welcome_greeting.replace("{name}", name)
    }

    pub fn reset_for(&self, name: &str) -> String {
        self.reset_greeting.replace("{name}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_webhook_url() -> String {
    "http://localhost:5678/webhook/chat".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_simulated_delay_ms() -> u64 {
    800
}

fn default_welcome_greeting() -> String {
    "Welcome to the panel, {name}. I am your AI political strategy analyst. I am ready to evaluate speeches, electoral trends or crisis scenarios. Where shall we begin?".to_string()
}

fn default_reset_greeting() -> String {
    "Session restarted, {name}. Which new scenario or speech would you like to analyze?"
        .to_string()
}

fn default_connection_error() -> String {
    "Connection error with the analysis server. Please try again.".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl ParleyConfig {
    pub fn validate(&self) -> Result<(), ChatError> {
        let url = self.webhook.url.trim();
        if url.is_empty() {
            return Err(ChatError::Config("Webhook URL cannot be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ChatError::Config(format!(
                "Webhook URL must start with http:// or https://, got '{}'",
                url
            )));
        }

        if self.webhook.timeout_secs == 0 {
            return Err(ChatError::Config(
                "Webhook timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.chat.connection_error.trim().is_empty() {
            return Err(ChatError::Config(
                "Chat connection_error message cannot be empty".to_string(),
            ));
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ChatError::Config(format!(
                "Unknown log level '{}'. Expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}
