//! Notification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{FreezeCategory, FreezeStatus, StudentRecord};

/// Kind of status change being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A hold was placed
    Freeze,
    /// A hold was lifted
    Unfreeze,
}

/// Structured payload attached to a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Reason category of the hold
    pub category: FreezeCategory,
    /// Hold expiry, when one was set
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

/// One message handed to the notification sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Short headline
    pub title: String,
    /// Reason-bearing body text
    pub message: String,
    /// What happened
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Structured payload for the client
    pub data: NotificationData,
}

impl Notification {
    /// Notification for a freshly-applied hold.
    pub fn freeze(status: &FreezeStatus) -> Self {
        let message = match status.until {
            Some(until) => format!(
                "Your placement profile has been frozen until {}: {}",
                until.format("%Y-%m-%d"),
                status.reason
            ),
            None => format!("Your placement profile has been frozen: {}", status.reason),
        };
        Self {
            title: "Placement profile frozen".to_string(),
            message,
            kind: NotificationKind::Freeze,
            data: NotificationData {
                category: status.category,
                until: status.until,
            },
        }
    }

    /// Notification for a lifted hold.
    pub fn unfreeze(student: &StudentRecord, reason: &str) -> Self {
        let category = student
            .freezed
            .as_ref()
            .map(|status| status.category)
            .unwrap_or_default();
        Self {
            title: "Placement profile unfrozen".to_string(),
            message: format!("Your placement profile is active again: {reason}"),
            kind: NotificationKind::Unfreeze,
            data: NotificationData {
                category,
                until: None,
            },
        }
    }
}
