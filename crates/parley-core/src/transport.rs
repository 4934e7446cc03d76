//! Outbound webhook transport.
//!
//! [`ChatTransport`] is the seam between the conversation driver and the
//! network. The HTTP implementation posts the message with the session id as
//! correlation tag and hands back the decoded JSON untouched; making sense of
//! its shape is the normalizer's job.

use crate::config::WebhookConfig;
use crate::core_types::ChatRequest;
use crate::errors::ChatError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one chat message and return the decoded reply payload.
    async fn send_chat(&self, request: &ChatRequest, token: &str) -> Result<Value, ChatError>;
}

/// HTTP client for the chat webhook
pub struct HttpChatTransport {
    webhook_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpChatTransport {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.url.clone()).with_timeout(Duration::from_secs(config.timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send_chat(&self, request: &ChatRequest, token: &str) -> Result<Value, ChatError> {
        log::debug!(
            "POST {} for session {}",
            self.webhook_url,
            request.session_id
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .bearer_auth(token)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Webhook {} is not reachable: {}", self.webhook_url, e);
                ChatError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            log::error!("Webhook returned {}: {}", status, body);
            return Err(ChatError::Transport(format!(
                "Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status")
            )));
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        Ok(payload)
    }
}
