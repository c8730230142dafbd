//! Bulk freeze/unfreeze orchestration
//!
//! The orchestrator owns the domain logic of a bulk status change: the
//! per-student skip/mutate decision, the status and history construction,
//! the standalone audit insert, the handoff to the batch executor, and the
//! notification fan-out to students whose writes committed.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::batch::{BatchExecutor, BatchOperation, BatchRunConfig, DocumentRef, FieldWrite};
use crate::core::notifications::{Notification, NotificationDispatcher};
use crate::core::types::{
    ActorContext, AuditLogEntry, BulkResult, FreezeAction, FreezeHistoryEntry, FreezePayload,
    FreezeStatus, NotifyOptions, OutcomeStatus, StudentOutcome, StudentRecord,
};
use crate::storage::{DocumentStore, FREEZE_LOGS_COLLECTION, STUDENTS_COLLECTION};
use crate::utils::error::{PortalError, Result};

/// What one student contributes to the batch, decided before execution.
enum StudentPlan {
    /// Nothing to do; no write, no history entry, no notification
    Skipped { message: &'static str },
    /// Two operations queued: the student update and the audit insert
    Queued {
        op_ids: [Uuid; 2],
        notification: Notification,
    },
}

/// Drives bulk freeze/unfreeze actions end to end.
pub struct FreezeOrchestrator {
    executor: BatchExecutor,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl FreezeOrchestrator {
    /// Build an orchestrator over a store and a notification sink.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        batch_config: BatchRunConfig,
    ) -> Self {
        Self {
            executor: BatchExecutor::new(store, batch_config),
            dispatcher,
        }
    }

    /// Place a hold on each resolved student.
    ///
    /// Students already frozen are skipped unless `payload.update_existing`
    /// is set, in which case their status is replaced and a fresh history
    /// entry is appended.
    pub async fn freeze_students(
        &self,
        students: &[StudentRecord],
        payload: &FreezePayload,
        notify: &NotifyOptions,
        actor: &ActorContext,
    ) -> Result<BulkResult> {
        self.apply(FreezeAction::Freeze, students, payload, notify, actor)
            .await
    }

    /// Lift the hold on each resolved student.
    ///
    /// Students with no active hold are skipped. A successful unfreeze
    /// leaves the status exactly absent, never an `active: false` object.
    pub async fn unfreeze_students(
        &self,
        students: &[StudentRecord],
        payload: &FreezePayload,
        notify: &NotifyOptions,
        actor: &ActorContext,
    ) -> Result<BulkResult> {
        self.apply(FreezeAction::Unfreeze, students, payload, notify, actor)
            .await
    }

    async fn apply(
        &self,
        action: FreezeAction,
        students: &[StudentRecord],
        payload: &FreezePayload,
        notify: &NotifyOptions,
        actor: &ActorContext,
    ) -> Result<BulkResult> {
        if students.is_empty() {
            return Err(PortalError::validation("no students to process"));
        }
        if payload.reason.trim().is_empty() {
            return Err(PortalError::validation("reason is required"));
        }
        if actor.id.trim().is_empty() {
            return Err(PortalError::validation("no authenticated actor"));
        }

        let now = Utc::now();
        let mut operations = Vec::with_capacity(students.len() * 2);
        let mut plans = Vec::with_capacity(students.len());

        for student in students {
            let skip_message = match action {
                FreezeAction::Freeze if student.is_frozen() && !payload.update_existing => {
                    Some("Already frozen")
                }
                FreezeAction::Unfreeze if !student.is_frozen() => Some("Not frozen"),
                _ => None,
            };
            if let Some(message) = skip_message {
                plans.push(StudentPlan::Skipped { message });
                continue;
            }

            let until = match action {
                FreezeAction::Freeze => payload.until,
                FreezeAction::Unfreeze => None,
            };

            let (status_value, notification) = match action {
                FreezeAction::Freeze => {
                    let status = FreezeStatus {
                        active: true,
                        reason: payload.reason.clone(),
                        category: payload.category,
                        notes: payload.notes.clone(),
                        actor_id: actor.id.clone(),
                        actor_name: actor.name.clone(),
                        from: payload.from.unwrap_or(now),
                        until,
                    };
                    let notification = Notification::freeze(&status);
                    (serde_json::to_value(&status)?, notification)
                }
                FreezeAction::Unfreeze => {
                    (Value::Null, Notification::unfreeze(student, &payload.reason))
                }
            };

            let entry = FreezeHistoryEntry {
                action,
                reason: payload.reason.clone(),
                category: payload.category,
                notes: payload.notes.clone(),
                actor_id: actor.id.clone(),
                actor_name: actor.name.clone(),
                at: now,
                until,
                roll_number: student.roll_number.clone(),
            };

            let update = BatchOperation::update(
                DocumentRef::new(STUDENTS_COLLECTION, &student.id),
                HashMap::from([
                    ("freezed".to_string(), FieldWrite::Set(status_value)),
                    (
                        "freezeHistory".to_string(),
                        FieldWrite::Append(vec![serde_json::to_value(&entry)?]),
                    ),
                ]),
            );

            let audit = AuditLogEntry {
                student_record_id: student.id.clone(),
                roll_number: student.roll_number.clone(),
                department: student.department.clone(),
                batch: student.batch.clone(),
                action,
                reason: payload.reason.clone(),
                category: payload.category,
                notes: payload.notes.clone(),
                actor_id: actor.id.clone(),
                actor_name: actor.name.clone(),
                at: now,
                until,
            };
            let insert = BatchOperation::create(
                DocumentRef::new(FREEZE_LOGS_COLLECTION, audit.document_id()),
                object_writes(&audit)?,
            );

            plans.push(StudentPlan::Queued {
                op_ids: [update.id, insert.id],
                notification,
            });
            operations.push(update);
            operations.push(insert);
        }

        info!(
            %action,
            students = students.len(),
            queued = operations.len() / 2,
            "starting bulk status change"
        );

        let report = self.executor.run_with_retry(operations).await;
        let failed_ops = report.failed_op_set();

        let mut result = BulkResult::default();
        for (student, plan) in students.iter().zip(&plans) {
            match plan {
                StudentPlan::Skipped { message } => {
                    result.results.push(StudentOutcome {
                        roll_number: student.roll_number.clone(),
                        status: OutcomeStatus::Skipped,
                        message: (*message).to_string(),
                    });
                }
                StudentPlan::Queued {
                    op_ids,
                    notification,
                } => {
                    if op_ids.iter().any(|id| failed_ops.contains(id)) {
                        result.failed += 1;
                        result.results.push(StudentOutcome {
                            roll_number: student.roll_number.clone(),
                            status: OutcomeStatus::Failed,
                            message: format!(
                                "Write failed after {} attempts",
                                report.total_attempts
                            ),
                        });
                        continue;
                    }

                    result.successful += 1;
                    result.results.push(StudentOutcome {
                        roll_number: student.roll_number.clone(),
                        status: OutcomeStatus::Success,
                        message: match action {
                            FreezeAction::Freeze => "Frozen".to_string(),
                            FreezeAction::Unfreeze => "Unfrozen".to_string(),
                        },
                    });

                    // Fire-and-forget: a failed dispatch never changes the
                    // mutation's recorded outcome.
                    if notify.send {
                        if let Err(e) = self.dispatcher.notify(&student.id, notification).await {
                            warn!(
                                roll = %student.roll_number,
                                error = %e,
                                "notification dispatch failed"
                            );
                        }
                    }
                }
            }
        }

        info!(
            %action,
            successful = result.successful,
            failed = result.failed,
            skipped = result.results.len() - result.successful - result.failed,
            "bulk status change complete"
        );
        Ok(result)
    }
}

/// Serialize a record into per-field `Set` writes for a document create.
fn object_writes(record: &impl Serialize) -> Result<HashMap<String, FieldWrite>> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(field, value)| (field, FieldWrite::Set(value)))
            .collect()),
        _ => Err(PortalError::Internal(
            "record did not serialize to an object".to_string(),
        )),
    }
}
