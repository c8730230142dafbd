//! # Placement Portal
//!
//! Core of a student-records placement portal: the bulk student
//! status-change pipeline ("freeze/unfreeze") and its collaborators.
//!
//! ## Features
//!
//! - **Roll-number parsing**: free-text and tabular input to a deduplicated,
//!   ordered candidate list
//! - **Resolution**: chunked lookups against the document store, classifying
//!   every identifier as found, missing, or duplicate
//! - **Bulk status changes**: per-student skip/mutate decisions, full audit
//!   trail, and append-only history
//! - **Batched writes**: chunk-atomic commits with bounded batch size and
//!   retry with linear backoff
//! - **Notification fan-out**: best-effort delivery to successfully-mutated
//!   students only
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use placement_portal::{
//!     ActorContext, FreezePayload, MemoryStore, NotifyOptions, Portal, PortalConfig,
//!     RecordingDispatcher, parse_free_text,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     let dispatcher = Arc::new(RecordingDispatcher::new());
//!     let portal = Portal::new(store, dispatcher, &PortalConfig::default());
//!
//!     let rolls = parse_free_text("21CS001, 21CS002\n21CS003");
//!     let resolution = portal.resolve_students_by_roll(&rolls).await;
//!
//!     let payload = FreezePayload::new("fee dues pending");
//!     let actor = ActorContext::new("admin-1", "Placement Office");
//!     let result = portal
//!         .freeze_students(&resolution.found, &payload, &NotifyOptions::default(), &actor)
//!         .await?;
//!
//!     println!("{} frozen, {} failed", result.successful, result.failed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod portal;
pub mod storage;
pub mod utils;

// Re-export the caller-facing surface.
pub use crate::config::{BatchConfig, NotificationConfig, PortalConfig, StoreConfig};
pub use crate::core::batch::{
    BatchExecutor, BatchOperation, BatchRunConfig, BatchRunReport, DocumentRef, FieldWrite,
    OperationKind,
};
pub use crate::core::freeze::FreezeOrchestrator;
pub use crate::core::notifications::{
    Notification, NotificationData, NotificationDispatcher, NotificationKind, RecordingDispatcher,
    WebhookDispatcher,
};
pub use crate::core::parser::{is_valid_roll_number, parse_free_text, parse_tabular};
pub use crate::core::resolver::StudentResolver;
pub use crate::core::types::{
    ActorContext, AuditLogEntry, BulkResult, DuplicateRoll, FreezeAction, FreezeCategory,
    FreezeHistoryEntry, FreezePayload, FreezeStatus, MissingRoll, NotifyOptions, OutcomeStatus,
    ResolutionResult, StudentOutcome, StudentRecord,
};
pub use crate::portal::Portal;
pub use crate::storage::{
    Document, DocumentStore, FREEZE_LOGS_COLLECTION, MAX_BATCH_OPERATIONS, MAX_IN_QUERY_VALUES,
    MemoryStore, STUDENTS_COLLECTION,
};
pub use crate::utils::error::{PortalError, Result};
pub use crate::utils::logging::init_logging;
