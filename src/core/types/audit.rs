//! Standalone audit log records
//!
//! Audit entries mirror a student's history entries but live in their own
//! collection, independent of the student document, so a tampered or
//! rewritten record never silently rewrites its audit trail. This subsystem
//! only ever inserts them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::student::{FreezeAction, FreezeCategory};

/// One durable audit record for a freeze/unfreeze mutation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Document id of the mutated student
    pub student_record_id: String,
    /// Roll number at mutation time
    pub roll_number: String,
    /// Department snapshot
    #[serde(default)]
    pub department: String,
    /// Batch snapshot
    #[serde(default)]
    pub batch: String,
    /// What happened
    pub action: FreezeAction,
    /// Reason given by the actor
    pub reason: String,
    /// Reason category
    #[serde(default)]
    pub category: FreezeCategory,
    /// Free-form operator notes
    #[serde(default)]
    pub notes: String,
    /// Id of the acting operator
    pub actor_id: String,
    /// Display name of the acting operator
    pub actor_name: String,
    /// When the mutation was recorded
    pub at: DateTime<Utc>,
    /// Hold expiry carried by a freeze action
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

impl AuditLogEntry {
    /// Document key in the audit collection: `{studentRecordId}_{timestamp}`.
    pub fn document_id(&self) -> String {
        format!("{}_{}", self.student_record_id, self.at.timestamp_millis())
    }
}
