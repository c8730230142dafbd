//! Per-student outcomes of a bulk action

use serde::{Deserialize, Serialize};

/// Verdict for one student in a bulk action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// Every write queued for the student committed
    Success,
    /// At least one write queued for the student failed permanently
    Failed,
    /// The student required no change and nothing was written
    Skipped,
}

/// One result row, in the order students were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentOutcome {
    /// Roll number of the student
    pub roll_number: String,
    /// Verdict
    pub status: OutcomeStatus,
    /// Human-readable explanation for the result table
    pub message: String,
}

/// Aggregate result of one bulk freeze/unfreeze action.
///
/// `successful + failed` counts mutated students only; skipped students
/// appear in `results` but in neither counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkResult {
    /// Students whose mutation committed
    pub successful: usize,
    /// Students whose mutation failed permanently
    pub failed: usize,
    /// One row per submitted student
    pub results: Vec<StudentOutcome>,
}

impl BulkResult {
    /// Rows with the given status.
    pub fn with_status(&self, status: OutcomeStatus) -> impl Iterator<Item = &StudentOutcome> {
        self.results.iter().filter(move |r| r.status == status)
    }
}
