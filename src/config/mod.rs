//! Configuration management for the portal
//!
//! This module handles loading and validation of all portal configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::batch::BatchRunConfig;
use crate::storage::{MAX_BATCH_OPERATIONS, MAX_IN_QUERY_VALUES};
use crate::utils::error::{PortalError, Result};

/// Main configuration struct for the portal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Document store query limits
    pub store: StoreConfig,
    /// Batch execution tuning
    pub batch: BatchConfig,
    /// Notification sink settings
    pub notifications: NotificationConfig,
}

/// Document store query limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Keys per resolution query; the store caps `IN` queries at this size
    pub resolve_chunk_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            resolve_chunk_size: MAX_IN_QUERY_VALUES,
        }
    }
}

/// Batch execution tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Operations per atomic chunk; the store caps batches at this size
    pub chunk_size: usize,
    /// Commit attempts per chunk, including the first
    pub max_retries: u32,
    /// Linear backoff base between attempt rounds, in milliseconds
    pub backoff_base_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: MAX_BATCH_OPERATIONS,
            max_retries: 3,
            backoff_base_ms: 1_000,
        }
    }
}

/// Notification sink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// URL of the HTTP notification sink, when one is configured
    pub webhook_url: Option<String>,
    /// Per-delivery timeout, in seconds
    pub timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 10,
        }
    }
}

impl PortalConfig {
    /// Load configuration from a YAML file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PortalError::Config(format!("Failed to read config file: {e}")))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| PortalError::Config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = read_env_parsed("PORTAL_RESOLVE_CHUNK_SIZE")? {
            config.store.resolve_chunk_size = value;
        }
        if let Some(value) = read_env_parsed("PORTAL_BATCH_CHUNK_SIZE")? {
            config.batch.chunk_size = value;
        }
        if let Some(value) = read_env_parsed("PORTAL_BATCH_MAX_RETRIES")? {
            config.batch.max_retries = value;
        }
        if let Some(value) = read_env_parsed("PORTAL_BATCH_BACKOFF_MS")? {
            config.batch.backoff_base_ms = value;
        }
        if let Ok(url) = std::env::var("PORTAL_NOTIFY_WEBHOOK_URL") {
            config.notifications.webhook_url = Some(url);
        }
        if let Some(value) = read_env_parsed("PORTAL_NOTIFY_TIMEOUT_SECS")? {
            config.notifications.timeout_secs = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check configured limits against the store's hard caps.
    pub fn validate(&self) -> Result<()> {
        if self.store.resolve_chunk_size == 0 || self.store.resolve_chunk_size > MAX_IN_QUERY_VALUES
        {
            return Err(PortalError::Config(format!(
                "resolve_chunk_size must be between 1 and {MAX_IN_QUERY_VALUES}"
            )));
        }
        if self.batch.chunk_size == 0 || self.batch.chunk_size > MAX_BATCH_OPERATIONS {
            return Err(PortalError::Config(format!(
                "batch chunk_size must be between 1 and {MAX_BATCH_OPERATIONS}"
            )));
        }
        if self.batch.max_retries == 0 {
            return Err(PortalError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.notifications.timeout_secs == 0 {
            return Err(PortalError::Config(
                "notification timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Executor configuration derived from the batch section.
    pub fn batch_run_config(&self) -> BatchRunConfig {
        BatchRunConfig::new()
            .with_chunk_size(self.batch.chunk_size)
            .with_max_retries(self.batch.max_retries)
            .with_backoff_base(Duration::from_millis(self.batch.backoff_base_ms))
    }

    /// Notification delivery timeout.
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notifications.timeout_secs)
    }
}

fn read_env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map(Some).map_err(|_| {
            PortalError::Config(format!("environment variable {name} has an invalid value"))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_store_caps() {
        let config = PortalConfig::default();
        assert_eq!(config.store.resolve_chunk_size, 10);
        assert_eq!(config.batch.chunk_size, 400);
        assert_eq!(config.batch.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_limits_beyond_store_caps() {
        let mut config = PortalConfig::default();
        config.store.resolve_chunk_size = MAX_IN_QUERY_VALUES + 1;
        assert!(config.validate().is_err());

        let mut config = PortalConfig::default();
        config.batch.chunk_size = 0;
        assert!(config.validate().is_err());

        let mut config = PortalConfig::default();
        config.batch.max_retries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_sections_override_defaults() {
        let yaml = "batch:\n  chunk_size: 100\n  max_retries: 5\nstore:\n  resolve_chunk_size: 5\n";
        let config: PortalConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.batch.chunk_size, 100);
        assert_eq!(config.batch.max_retries, 5);
        assert_eq!(config.store.resolve_chunk_size, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.notifications.timeout_secs, 10);
    }
}
