//! Portal facade
//!
//! Wires a document store, a notification sink, and configuration into the
//! caller-facing operations the UI layer consumes.

use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::config::PortalConfig;
use crate::core::freeze::FreezeOrchestrator;
use crate::core::notifications::NotificationDispatcher;
use crate::core::resolver::StudentResolver;
use crate::core::types::{
    ActorContext, AuditLogEntry, BulkResult, FreezePayload, NotifyOptions, ResolutionResult,
    StudentRecord,
};
use crate::storage::{DocumentStore, FREEZE_LOGS_COLLECTION, STUDENTS_COLLECTION};
use crate::utils::error::Result;

/// Entry point for the student-records placement portal core.
pub struct Portal {
    store: Arc<dyn DocumentStore>,
    resolver: StudentResolver,
    orchestrator: FreezeOrchestrator,
}

impl Portal {
    /// Wire the pipeline over a store and a notification sink.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        config: &PortalConfig,
    ) -> Self {
        Self {
            resolver: StudentResolver::new(store.clone(), config.store.resolve_chunk_size),
            orchestrator: FreezeOrchestrator::new(
                store.clone(),
                dispatcher,
                config.batch_run_config(),
            ),
            store,
        }
    }

    /// Resolve roll numbers into found / missing / duplicate buckets.
    pub async fn resolve_students_by_roll(&self, roll_numbers: &[String]) -> ResolutionResult {
        self.resolver.resolve(roll_numbers).await
    }

    /// Place a hold on each resolved student.
    pub async fn freeze_students(
        &self,
        students: &[StudentRecord],
        payload: &FreezePayload,
        notify: &NotifyOptions,
        actor: &ActorContext,
    ) -> Result<BulkResult> {
        self.orchestrator
            .freeze_students(students, payload, notify, actor)
            .await
    }

    /// Lift the hold on each resolved student.
    pub async fn unfreeze_students(
        &self,
        students: &[StudentRecord],
        payload: &FreezePayload,
        notify: &NotifyOptions,
        actor: &ActorContext,
    ) -> Result<BulkResult> {
        self.orchestrator
            .unfreeze_students(students, payload, notify, actor)
            .await
    }

    /// Students currently carrying a hold, for the frozen-roster view.
    pub async fn list_frozen_students(&self) -> Result<Vec<StudentRecord>> {
        let documents = self
            .store
            .find_by_field_in(STUDENTS_COLLECTION, "freezed.active", &[Value::Bool(true)])
            .await?;

        let mut students = Vec::with_capacity(documents.len());
        for document in documents {
            match document.deserialize::<StudentRecord>() {
                Ok(student) => students.push(student),
                Err(e) => warn!(id = %document.id, error = %e, "skipping malformed student document"),
            }
        }
        Ok(students)
    }

    /// Audit records for one student, newest first, for the audit view.
    ///
    /// This subsystem only ever reads and inserts audit records; it never
    /// updates or deletes them.
    pub async fn freeze_logs_for(&self, record_id: &str) -> Result<Vec<AuditLogEntry>> {
        let documents = self
            .store
            .find_by_field_in(
                FREEZE_LOGS_COLLECTION,
                "studentRecordId",
                &[Value::String(record_id.to_string())],
            )
            .await?;

        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            match document.deserialize::<AuditLogEntry>() {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(id = %document.id, error = %e, "skipping malformed audit record"),
            }
        }
        entries.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(entries)
    }
}
