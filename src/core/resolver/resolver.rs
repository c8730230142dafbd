//! Roll-number to student-record resolution

use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::types::{DuplicateRoll, MissingRoll, ResolutionResult, StudentRecord};
use crate::storage::{DocumentStore, STUDENTS_COLLECTION};

/// Maps candidate identifiers to student records, classifying each into
/// found / missing / duplicate.
pub struct StudentResolver {
    store: Arc<dyn DocumentStore>,
    chunk_size: usize,
}

impl StudentResolver {
    /// Build a resolver; `chunk_size` is the store's per-query key cap.
    pub fn new(store: Arc<dyn DocumentStore>, chunk_size: usize) -> Self {
        Self {
            store,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Resolve roll numbers against the `students` collection.
    ///
    /// The input is partitioned into query-sized chunks resolved
    /// sequentially. A record whose roll number was already resolved earlier
    /// (in any chunk) is classified as a duplicate rather than added to
    /// `found` a second time. A failed chunk query degrades every identifier
    /// in that chunk to missing with an attached note; it never aborts the
    /// whole resolution. Empty input yields three empty lists.
    pub async fn resolve(&self, roll_numbers: &[String]) -> ResolutionResult {
        let mut result = ResolutionResult::default();
        if roll_numbers.is_empty() {
            return result;
        }

        info!(requested = roll_numbers.len(), "resolving roll numbers");
        let mut resolved: HashSet<String> = HashSet::new();

        for chunk in roll_numbers.chunks(self.chunk_size) {
            let values: Vec<Value> = chunk.iter().map(|r| Value::String(r.clone())).collect();

            let documents = match self
                .store
                .find_by_field_in(STUDENTS_COLLECTION, "rollNumber", &values)
                .await
            {
                Ok(documents) => documents,
                Err(e) => {
                    warn!(error = %e, size = chunk.len(), "chunk query failed, marking chunk missing");
                    for roll in chunk {
                        result.missing.push(MissingRoll {
                            roll_number: roll.clone(),
                            note: Some(format!("lookup failed: {e}")),
                        });
                    }
                    continue;
                }
            };

            let mut matched: HashSet<String> = HashSet::new();
            for document in documents {
                let record: StudentRecord = match document.deserialize() {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(id = %document.id, error = %e, "skipping malformed student document");
                        continue;
                    }
                };

                matched.insert(record.roll_number.clone());
                if resolved.insert(record.roll_number.clone()) {
                    result.found.push(record);
                } else {
                    debug!(roll = %record.roll_number, id = %record.id, "duplicate roll number");
                    result.duplicates.push(DuplicateRoll {
                        roll_number: record.roll_number,
                        record_id: record.id,
                        freezed: record.freezed,
                    });
                }
            }

            for roll in chunk {
                if !matched.contains(roll) && !resolved.contains(roll) {
                    result.missing.push(MissingRoll {
                        roll_number: roll.clone(),
                        note: None,
                    });
                }
            }
        }

        info!(
            found = result.found.len(),
            missing = result.missing.len(),
            duplicates = result.duplicates.len(),
            "resolution complete"
        );
        result
    }
}
