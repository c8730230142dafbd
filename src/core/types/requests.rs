//! Caller-supplied payloads for bulk status changes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::student::FreezeCategory;

/// Options for a freeze or unfreeze action.
///
/// Every recognized option is an explicit field with a default; unknown
/// fields in incoming JSON are rejected rather than silently carried along.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FreezePayload {
    /// Required human-readable reason
    pub reason: String,
    /// Reason category
    #[serde(default)]
    pub category: FreezeCategory,
    /// Free-form operator notes
    #[serde(default)]
    pub notes: String,
    /// When the hold takes effect; defaults to commit time
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    /// When the hold lapses; `None` means indefinite
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
    /// Replace the status of already-frozen students instead of skipping them
    #[serde(default)]
    pub update_existing: bool,
}

impl FreezePayload {
    /// Payload with the given reason and defaults everywhere else.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            category: FreezeCategory::default(),
            notes: String::new(),
            from: None,
            until: None,
            update_existing: false,
        }
    }

    /// Set the reason category.
    pub fn with_category(mut self, category: FreezeCategory) -> Self {
        self.category = category;
        self
    }

    /// Attach operator notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set an explicit effective-from time.
    pub fn with_from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Set a hold expiry.
    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    /// Overwrite the status of students that are already frozen.
    pub fn with_update_existing(mut self, update_existing: bool) -> Self {
        self.update_existing = update_existing;
        self
    }
}

/// Notification fan-out options for one bulk action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotifyOptions {
    /// Whether to notify successfully-mutated students
    pub send: bool,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self { send: true }
    }
}

impl NotifyOptions {
    /// Suppress all notifications for this action.
    pub fn silent() -> Self {
        Self { send: false }
    }
}
