//! Authentication provider seam.
//!
//! There is no real identity backend yet. [`SimulatedAuthProvider`] stands in
//! for one: it waits a fixed delay, rejects empty fields with a user-facing
//! message and otherwise hands out a fixed token.

use crate::core_types::{AuthResponse, User};
use crate::errors::ChatError;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

pub const LOGIN_MISSING_FIELDS: &str = "Please enter your email and password.";
pub const REGISTER_MISSING_FIELDS: &str = "All fields are required.";

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ChatError>;

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ChatError>;
}

pub struct SimulatedAuthProvider {
    delay: Duration,
}

impl Default for SimulatedAuthProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

impl SimulatedAuthProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AuthProvider for SimulatedAuthProvider {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ChatError> {
        tokio::time::sleep(self.delay).await;

        if email.is_empty() || password.is_empty() {
            return Err(ChatError::Validation(LOGIN_MISSING_FIELDS.to_string()));
        }

        log::info!("Simulated login for {}", email);
        Ok(AuthResponse {
            token: "mock-session-token-12345".to_string(),
            user: User {
                id: "user-001".to_string(),
                name: "Demo User".to_string(),
                email: email.to_string(),
            },
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ChatError> {
        tokio::time::sleep(self.delay).await;

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ChatError::Validation(REGISTER_MISSING_FIELDS.to_string()));
        }

        log::info!("Simulated registration for {}", email);
        Ok(AuthResponse {
            token: "mock-session-token-67890".to_string(),
            user: User {
                id: Utc::now().timestamp_millis().to_string(),
                name: name.to_string(),
                email: email.to_string(),
            },
        })
    }
}
