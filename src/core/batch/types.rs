//! Batch write types and data structures

use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Where an operation lands: one document in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    /// Collection name
    pub collection: String,
    /// Document id within the collection
    pub id: String,
}

impl DocumentRef {
    /// Build a reference from a collection name and document id.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl std::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// What an operation does to its target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Create the document (overwriting an existing one)
    Create,
    /// Update fields on an existing document; fails if the document is absent
    Update,
    /// Delete the document
    Delete,
}

/// One field-level write inside a create or update.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    /// Replace the field with the value
    Set(Value),
    /// Atomically add the values to an array field, skipping elements the
    /// array already contains (the store's array-union primitive)
    Append(Vec<Value>),
}

/// One unit of work consumed by the batch executor.
///
/// Transient: built by the orchestrator, committed by the executor, and
/// discarded. The `id` exists so batch results can be attributed back to the
/// student that queued the operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOperation {
    /// Identity for result attribution
    pub id: Uuid,
    /// What to do
    pub kind: OperationKind,
    /// Target document
    pub target: DocumentRef,
    /// Field writes applied by a create or update; empty for deletes
    pub writes: HashMap<String, FieldWrite>,
}

impl BatchOperation {
    /// Operation that creates (or overwrites) a document.
    pub fn create(target: DocumentRef, writes: HashMap<String, FieldWrite>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: OperationKind::Create,
            target,
            writes,
        }
    }

    /// Operation that updates fields on an existing document.
    pub fn update(target: DocumentRef, writes: HashMap<String, FieldWrite>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: OperationKind::Update,
            target,
            writes,
        }
    }

    /// Operation that deletes a document.
    pub fn delete(target: DocumentRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: OperationKind::Delete,
            target,
            writes: HashMap::new(),
        }
    }
}
