//! Common request-scoped types

use serde::{Deserialize, Serialize};

/// Identity of the operator driving a request.
///
/// Authentication happens upstream; callers hand the resolved identity in
/// and it is stamped onto every status, history entry, and audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorContext {
    /// Stable id of the operator
    pub id: String,
    /// Display name of the operator
    pub name: String,
}

impl ActorContext {
    /// Build an actor context from an id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
