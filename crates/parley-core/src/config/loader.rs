//! Configuration loader for YAML files and environment overrides

use crate::config::types::*;
use crate::errors::ChatError;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const ENV_WEBHOOK_URL: &str = "PARLEY_WEBHOOK_URL";
pub const ENV_WEBHOOK_TIMEOUT_SECS: &str = "PARLEY_WEBHOOK_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "PARLEY_LOG_LEVEL";

/// Configuration loader with environment resolution
pub struct ConfigLoader;

impl ConfigLoader {
    /// `<config dir>/parley/parley.yaml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("parley").join("parley.yaml"))
    }

    /// Load the file at `path`, or the default location when `path` is `None`.
    ///
    /// A missing default file is not an error; built-in defaults are used.
    pub async fn load(path: Option<&Path>) -> Result<ParleyConfig, ChatError> {
        match path {
            Some(path) => Self::from_file(path).await,
            None => match Self::default_path() {
                Some(default) if default.exists() => {
                    log::info!("Loading configuration from {}", default.display());
                    Self::from_file(default).await
                }
                _ => {
                    log::debug!("No configuration file found, using defaults");
                    Self::from_str("{}")
                }
            },
        }
    }

    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<ParleyConfig, ChatError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).await.map_err(|e| {
            ChatError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_str(content: &str) -> Result<ParleyConfig, ChatError> {
        let mut config: ParleyConfig = if content.trim().is_empty() {
            ParleyConfig::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| ChatError::Config(format!("Failed to parse YAML config: {}", e)))?
        };

        Self::resolve_environment(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    fn resolve_environment(config: &mut ParleyConfig) -> Result<(), ChatError> {
        if let Ok(url) = env::var(ENV_WEBHOOK_URL) {
            if !url.is_empty() {
                log::debug!("Webhook URL overridden by {}", ENV_WEBHOOK_URL);
                config.webhook.url = url;
            }
        }

        if let Ok(timeout) = env::var(ENV_WEBHOOK_TIMEOUT_SECS) {
            config.webhook.timeout_secs = timeout.trim().parse().map_err(|_| {
                ChatError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_WEBHOOK_TIMEOUT_SECS, timeout
                ))
            })?;
        }

        if let Ok(level) = env::var(ENV_LOG_LEVEL) {
            if !level.is_empty() {
                config.logging.level = level;
            }
        }

        Ok(())
    }
}
