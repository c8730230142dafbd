//! Fixtures for integration tests

use placement_portal::{ActorContext, MemoryStore, PortalConfig, STUDENTS_COLLECTION};
use serde_json::{Value, json};

/// The operator used across integration tests.
pub fn actor() -> ActorContext {
    ActorContext::new("admin-1", "Placement Office")
}

/// Portal configuration with a backoff short enough for tests.
pub fn fast_config() -> PortalConfig {
    let mut config = PortalConfig::default();
    config.batch.backoff_base_ms = 1;
    config
}

/// An unfrozen student document payload.
pub fn student_doc(roll: &str) -> Value {
    json!({
        "rollNumber": roll,
        "name": format!("Student {roll}"),
        "email": format!("{}@example.edu", roll.to_lowercase()),
        "department": "CSE",
        "batch": "2023",
        "freezed": null,
        "freezeHistory": [],
    })
}

/// Seed one document per roll number, with ids `doc0`, `doc1`, ...
pub async fn seed_students(store: &MemoryStore, rolls: &[&str]) {
    for (i, roll) in rolls.iter().enumerate() {
        store
            .insert(STUDENTS_COLLECTION, &format!("doc{i}"), student_doc(roll))
            .await;
    }
}
