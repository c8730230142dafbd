//! Student record and freeze-status types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One student document from the `students` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Opaque document id
    #[serde(default)]
    pub id: String,
    /// Human-facing unique business identifier
    pub roll_number: String,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Department the student belongs to
    #[serde(default)]
    pub department: String,
    /// Admission batch (for example "2023")
    #[serde(default)]
    pub batch: String,
    /// Current administrative hold; `None` means the student is not frozen
    #[serde(default)]
    pub freezed: Option<FreezeStatus>,
    /// Append-only freeze/unfreeze transitions
    #[serde(default)]
    pub freeze_history: Vec<FreezeHistoryEntry>,
}

impl StudentRecord {
    /// Whether the student currently carries a hold.
    pub fn is_frozen(&self) -> bool {
        self.freezed.is_some()
    }
}

/// Why a student was frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FreezeCategory {
    /// Disciplinary action
    Discipline,
    /// Missing or invalid documents
    Documents,
    /// Attendance shortfall
    Attendance,
    /// Outstanding fees
    Fee,
    /// Anything else
    #[default]
    Other,
}

/// Direction of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreezeAction {
    /// Place a hold on the student
    Freeze,
    /// Lift an existing hold
    Unfreeze,
}

impl std::fmt::Display for FreezeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Freeze => write!(f, "freeze"),
            Self::Unfreeze => write!(f, "unfreeze"),
        }
    }
}

/// An active administrative hold.
///
/// "Unfrozen" is represented by the status being entirely absent from the
/// student document, never by `active: false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeStatus {
    /// Always `true` while the status object exists
    pub active: bool,
    /// Human-readable reason for the hold
    pub reason: String,
    /// Reason category
    #[serde(default)]
    pub category: FreezeCategory,
    /// Free-form operator notes
    #[serde(default)]
    pub notes: String,
    /// Id of the actor who applied the hold
    pub actor_id: String,
    /// Display name of the actor who applied the hold
    pub actor_name: String,
    /// When the hold takes effect
    pub from: DateTime<Utc>,
    /// When the hold lapses; `None` means indefinite
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

impl FreezeStatus {
    /// Whether the hold's expiry has passed.
    ///
    /// Expiry is a display concern only; a lapsed hold stays on the record
    /// until an explicit unfreeze clears it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.until.is_some_and(|until| until < now)
    }
}

/// One immutable freeze/unfreeze transition on a student's record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreezeHistoryEntry {
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
    /// When the transition was recorded
    pub at: DateTime<Utc>,
    /// Hold expiry carried by a freeze action
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
    /// Roll number at the time of the transition
    pub roll_number: String,
}
