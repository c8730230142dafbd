//! Roll-number resolution results
//!
//! Transient, in-memory only; never persisted.

use serde::{Deserialize, Serialize};

use super::student::{FreezeStatus, StudentRecord};

/// Outcome of resolving a list of roll numbers against the store.
///
/// The three buckets are disjoint by roll number: every requested identifier
/// lands in exactly one of them, with `duplicates` holding the extra store
/// records beyond a roll number's first `found` appearance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Students that matched a requested roll number, with their current
    /// freeze status snapshot
    pub found: Vec<StudentRecord>,
    /// Requested roll numbers with no matching record
    pub missing: Vec<MissingRoll>,
    /// Extra records whose roll number was already resolved once
    pub duplicates: Vec<DuplicateRoll>,
}

impl ResolutionResult {
    /// True when nothing was requested or nothing came back.
    pub fn is_empty(&self) -> bool {
        self.found.is_empty() && self.missing.is_empty() && self.duplicates.is_empty()
    }
}

/// A roll number that resolved to no student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingRoll {
    /// The unresolved identifier
    pub roll_number: String,
    /// Attached when the identifier was degraded to missing by a failed
    /// chunk query rather than a clean no-match
    #[serde(default)]
    pub note: Option<String>,
}

/// A second (or later) record carrying an already-resolved roll number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRoll {
    /// The duplicated business key
    pub roll_number: String,
    /// Document id of the extra record
    pub record_id: String,
    /// Freeze status of the extra record, for display
    #[serde(default)]
    pub freezed: Option<FreezeStatus>,
}
