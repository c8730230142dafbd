//! Notification dispatch
//!
//! The transport behind the sink (push, email) is out of scope; the portal
//! only ever calls `notify` with a fire-and-forget contract. Failures are
//! logged by the caller, never escalated.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use super::types::Notification;
use crate::utils::error::{PortalError, Result};

/// Best-effort side channel for telling students about status changes.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver one notification to one student.
    async fn notify(&self, target_id: &str, notification: &Notification) -> Result<()>;
}

/// Dispatcher that posts notifications to an HTTP sink as JSON.
pub struct WebhookDispatcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl WebhookDispatcher {
    /// Build a dispatcher for the given sink URL.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn notify(&self, target_id: &str, notification: &Notification) -> Result<()> {
        let body = json!({
            "targetId": target_id,
            "notification": notification,
        });

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PortalError::Notification(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(target = target_id, "notification delivered");
            Ok(())
        } else {
            Err(PortalError::Notification(format!(
                "sink returned status {status}"
            )))
        }
    }
}

/// Dispatcher that records every notification in memory.
///
/// Useful for tests and for embedders that drain notifications themselves.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<(String, Notification)>>,
}

impl RecordingDispatcher {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything dispatched so far, in order.
    pub async fn sent(&self) -> Vec<(String, Notification)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn notify(&self, target_id: &str, notification: &Notification) -> Result<()> {
        self.sent
            .lock()
            .await
            .push((target_id.to_string(), notification.clone()));
        Ok(())
    }
}
