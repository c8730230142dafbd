//! In-memory document store
//!
//! Backs tests and embedded deployments with the same contract the managed
//! database offers: bounded `IN` queries, atomic write batches, and the
//! array-union write primitive.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use super::store::{Document, DocumentStore, MAX_BATCH_OPERATIONS, MAX_IN_QUERY_VALUES};
use crate::core::batch::{BatchOperation, FieldWrite, OperationKind};
use crate::utils::error::{PortalError, Result};

/// Document store held entirely in memory.
///
/// Collections and documents are kept in ordered maps so query results are
/// deterministic across runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) one document, outside any batch.
    pub async fn insert(&self, collection: &str, id: &str, data: Value) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
    }

    /// Fetch one document's payload.
    pub async fn get(&self, collection: &str, id: &str) -> Option<Value> {
        let collections = self.collections.read().await;
        collections.get(collection)?.get(id).cloned()
    }

    /// Number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, BTreeMap::len)
    }

    /// Whether a collection holds no documents.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.len(collection).await == 0
    }
}

/// Resolve a dotted field path into a nested value.
fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Apply field writes to a document payload.
fn apply_writes(doc: &mut Value, writes: &HashMap<String, FieldWrite>) {
    let Value::Object(map) = doc else { return };
    for (field, write) in writes {
        match write {
            FieldWrite::Set(value) => {
                map.insert(field.clone(), value.clone());
            }
            FieldWrite::Append(values) => {
                let entry = map
                    .entry(field.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match entry {
                    Value::Array(items) => {
                        for value in values {
                            if !items.contains(value) {
                                items.push(value.clone());
                            }
                        }
                    }
                    // Union onto a non-array field replaces it, matching the
                    // managed store's primitive.
                    other => *other = Value::Array(values.clone()),
                }
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_field_in(
        &self,
        collection: &str,
        field: &str,
        values: &[Value],
    ) -> Result<Vec<Document>> {
        if values.len() > MAX_IN_QUERY_VALUES {
            return Err(PortalError::store(format!(
                "IN query carries {} values, store allows at most {}",
                values.len(),
                MAX_IN_QUERY_VALUES
            )));
        }

        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(documents
            .iter()
            .filter(|(_, data)| lookup_path(data, field).is_some_and(|v| values.contains(v)))
            .map(|(id, data)| Document::new(id.clone(), data.clone()))
            .collect())
    }

    async fn commit(&self, operations: &[BatchOperation]) -> Result<()> {
        if operations.len() > MAX_BATCH_OPERATIONS {
            return Err(PortalError::store(format!(
                "batch carries {} operations, store allows at most {}",
                operations.len(),
                MAX_BATCH_OPERATIONS
            )));
        }

        let mut collections = self.collections.write().await;

        // Validate before touching anything so the batch stays all-or-nothing.
        for op in operations {
            if op.kind == OperationKind::Update {
                let exists = collections
                    .get(&op.target.collection)
                    .is_some_and(|docs| docs.contains_key(&op.target.id));
                if !exists {
                    return Err(PortalError::store(format!(
                        "update target {} does not exist",
                        op.target
                    )));
                }
            }
        }

        for op in operations {
            let documents = collections.entry(op.target.collection.clone()).or_default();
            match op.kind {
                OperationKind::Create => {
                    let mut doc = Value::Object(serde_json::Map::new());
                    apply_writes(&mut doc, &op.writes);
                    documents.insert(op.target.id.clone(), doc);
                }
                OperationKind::Update => {
                    if let Some(doc) = documents.get_mut(&op.target.id) {
                        apply_writes(doc, &op.writes);
                    }
                }
                OperationKind::Delete => {
                    documents.remove(&op.target.id);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::DocumentRef;
    use serde_json::json;

    fn set(value: Value) -> FieldWrite {
        FieldWrite::Set(value)
    }

    #[tokio::test]
    async fn query_matches_dotted_paths() {
        let store = MemoryStore::new();
        store
            .insert("students", "s1", json!({"freezed": {"active": true}}))
            .await;
        store.insert("students", "s2", json!({"freezed": null})).await;

        let frozen = store
            .find_by_field_in("students", "freezed.active", &[json!(true)])
            .await
            .unwrap();
        assert_eq!(frozen.len(), 1);
        assert_eq!(frozen[0].id, "s1");
    }

    #[tokio::test]
    async fn query_rejects_oversized_value_lists() {
        let store = MemoryStore::new();
        let values: Vec<Value> = (0..MAX_IN_QUERY_VALUES + 1).map(|i| json!(i)).collect();
        let err = store
            .find_by_field_in("students", "rollNumber", &values)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Store(_)));
    }

    #[tokio::test]
    async fn commit_is_all_or_nothing() {
        let store = MemoryStore::new();
        let ops = vec![
            BatchOperation::create(
                DocumentRef::new("students", "s1"),
                HashMap::from([("name".to_string(), set(json!("A")))]),
            ),
            BatchOperation::update(
                DocumentRef::new("students", "absent"),
                HashMap::from([("name".to_string(), set(json!("B")))]),
            ),
        ];

        assert!(store.commit(&ops).await.is_err());
        assert!(store.get("students", "s1").await.is_none());
    }

    #[tokio::test]
    async fn append_unions_into_existing_arrays() {
        let store = MemoryStore::new();
        store
            .insert("students", "s1", json!({"freezeHistory": [{"n": 1}]}))
            .await;

        let op = BatchOperation::update(
            DocumentRef::new("students", "s1"),
            HashMap::from([(
                "freezeHistory".to_string(),
                FieldWrite::Append(vec![json!({"n": 1}), json!({"n": 2})]),
            )]),
        );
        store.commit(&[op]).await.unwrap();

        let doc = store.get("students", "s1").await.unwrap();
        assert_eq!(doc["freezeHistory"], json!([{"n": 1}, {"n": 2}]));
    }
}
