//! Document store abstraction
//!
//! The portal treats its database as an external collaborator: collections of
//! JSON documents, a bounded `IN` query by field, and atomic write batches.
//! Implementations adapt a managed document database; [`MemoryStore`] backs
//! tests and embedded use.
//!
//! [`MemoryStore`]: super::memory::MemoryStore

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::batch::BatchOperation;
use crate::utils::error::Result;

/// Collection holding one document per student.
pub const STUDENTS_COLLECTION: &str = "students";

/// Collection holding one standalone audit record per mutation attempt.
pub const FREEZE_LOGS_COLLECTION: &str = "student_freeze_logs";

/// Maximum number of values one `IN` query may carry.
pub const MAX_IN_QUERY_VALUES: usize = 10;

/// Maximum number of operations one atomic write batch may carry.
pub const MAX_BATCH_OPERATIONS: usize = 400;

/// A document returned from a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document id within its collection
    pub id: String,
    /// Document payload
    pub data: Value,
}

impl Document {
    /// Build a document from an id and payload.
    pub fn new(id: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Deserialize the payload into a typed record.
    ///
    /// The document id is injected into the payload under `"id"` before
    /// deserializing, so record types can carry the id as a plain field.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let mut value = self.data.clone();
        if let Value::Object(map) = &mut value {
            map.insert("id".to_string(), Value::String(self.id.clone()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Async interface to the document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch documents whose `field` equals any of `values`.
    ///
    /// `field` may be a dotted path into nested objects (for example
    /// `"freezed.active"`). Callers must respect [`MAX_IN_QUERY_VALUES`];
    /// implementations may reject longer value lists.
    async fn find_by_field_in(
        &self,
        collection: &str,
        field: &str,
        values: &[Value],
    ) -> Result<Vec<Document>>;

    /// Commit a write batch atomically.
    ///
    /// Either every operation applies or none does. Callers must respect
    /// [`MAX_BATCH_OPERATIONS`]; implementations may reject larger batches.
    async fn commit(&self, operations: &[BatchOperation]) -> Result<()>;
}
