//! End-to-end tests for the bulk freeze/unfreeze pipeline

use crate::common::fixtures::{actor, fast_config, seed_students, student_doc};
use placement_portal::{
    FREEZE_LOGS_COLLECTION, FreezePayload, MemoryStore, NotifyOptions, OutcomeStatus, Portal,
    RecordingDispatcher, STUDENTS_COLLECTION, parse_free_text,
};
use serde_json::{Value, json};
use std::sync::Arc;

fn portal_over(
    store: &Arc<MemoryStore>,
    dispatcher: &Arc<RecordingDispatcher>,
) -> Portal {
    Portal::new(store.clone(), dispatcher.clone(), &fast_config())
}

#[tokio::test]
async fn raw_text_to_frozen_records_and_back() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    seed_students(&store, &["A1", "B2", "C3"]).await;
    let portal = portal_over(&store, &dispatcher);

    // Duplicate input collapses at the parser, before any store access.
    let rolls = parse_free_text("A1, A1, B2\nZZ9");
    assert_eq!(rolls, vec!["A1", "B2", "ZZ9"]);

    let resolution = portal.resolve_students_by_roll(&rolls).await;
    assert_eq!(resolution.found.len(), 2);
    assert_eq!(resolution.missing.len(), 1);
    assert_eq!(resolution.missing[0].roll_number, "ZZ9");
    assert!(resolution.duplicates.is_empty());

    let payload = FreezePayload::new("fee dues pending");
    let result = portal
        .freeze_students(&resolution.found, &payload, &NotifyOptions::default(), &actor())
        .await
        .unwrap();

    assert_eq!(result.successful, 2);
    assert_eq!(result.failed, 0);

    // Status, history, and the standalone audit trail are all written.
    let doc = store.get(STUDENTS_COLLECTION, "doc0").await.unwrap();
    assert_eq!(doc["freezed"]["active"], json!(true));
    assert_eq!(doc["freezeHistory"].as_array().unwrap().len(), 1);
    assert_eq!(store.len(FREEZE_LOGS_COLLECTION).await, 2);

    // Notifications went to exactly the mutated students.
    let sent = dispatcher.sent().await;
    assert_eq!(sent.len(), 2);

    // A second freeze without update_existing is a no-op per student.
    let refreshed = portal.resolve_students_by_roll(&rolls).await;
    let again = portal
        .freeze_students(&refreshed.found, &payload, &NotifyOptions::default(), &actor())
        .await
        .unwrap();
    assert_eq!(again.successful, 0);
    assert!(
        again
            .results
            .iter()
            .all(|r| r.status == OutcomeStatus::Skipped)
    );
    let doc = store.get(STUDENTS_COLLECTION, "doc0").await.unwrap();
    assert_eq!(doc["freezeHistory"].as_array().unwrap().len(), 1);

    // Unfreeze clears the status entirely.
    let frozen = portal.resolve_students_by_roll(&rolls).await;
    let lifted = portal
        .unfreeze_students(
            &frozen.found,
            &FreezePayload::new("dues cleared"),
            &NotifyOptions::default(),
            &actor(),
        )
        .await
        .unwrap();
    assert_eq!(lifted.successful, 2);

    let doc = store.get(STUDENTS_COLLECTION, "doc0").await.unwrap();
    assert_eq!(doc["freezed"], Value::Null);
    assert_eq!(doc["freezeHistory"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn mixed_bulk_freeze_reports_one_row_per_student() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    seed_students(&store, &["A1", "B2", "C3"]).await;
    let portal = portal_over(&store, &dispatcher);

    // Freeze one of the three up front.
    let first = portal
        .resolve_students_by_roll(&["B2".to_string()])
        .await;
    portal
        .freeze_students(
            &first.found,
            &FreezePayload::new("existing hold"),
            &NotifyOptions::silent(),
            &actor(),
        )
        .await
        .unwrap();

    let all = portal
        .resolve_students_by_roll(&["A1".to_string(), "B2".to_string(), "C3".to_string()])
        .await;
    let result = portal
        .freeze_students(
            &all.found,
            &FreezePayload::new("attendance shortfall"),
            &NotifyOptions::default(),
            &actor(),
        )
        .await
        .unwrap();

    assert_eq!(result.successful, 2);
    assert_eq!(result.failed, 0);
    assert_eq!(result.results.len(), 3);

    let by_roll = |roll: &str| {
        result
            .results
            .iter()
            .find(|r| r.roll_number == roll)
            .unwrap()
    };
    assert_eq!(by_roll("A1").status, OutcomeStatus::Success);
    assert_eq!(by_roll("B2").status, OutcomeStatus::Skipped);
    assert_eq!(by_roll("B2").message, "Already frozen");
    assert_eq!(by_roll("C3").status, OutcomeStatus::Success);
}

#[tokio::test]
async fn read_views_reflect_the_pipeline() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    seed_students(&store, &["A1", "B2"]).await;
    let portal = portal_over(&store, &dispatcher);

    let resolution = portal
        .resolve_students_by_roll(&["A1".to_string()])
        .await;
    portal
        .freeze_students(
            &resolution.found,
            &FreezePayload::new("documents expired"),
            &NotifyOptions::silent(),
            &actor(),
        )
        .await
        .unwrap();

    let frozen = portal.list_frozen_students().await.unwrap();
    assert_eq!(frozen.len(), 1);
    assert_eq!(frozen[0].roll_number, "A1");

    let logs = portal.freeze_logs_for(&frozen[0].id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].reason, "documents expired");
    assert_eq!(logs[0].department, "CSE");

    // Unrelated students stay out of both views.
    let doc = store.get(STUDENTS_COLLECTION, "doc1").await.unwrap();
    assert_eq!(doc["freezed"], Value::Null);
    assert!(portal.freeze_logs_for("doc1").await.unwrap().is_empty());
}

#[tokio::test]
async fn tampering_with_a_student_never_touches_its_audit_trail() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    seed_students(&store, &["A1"]).await;
    let portal = portal_over(&store, &dispatcher);

    let resolution = portal
        .resolve_students_by_roll(&["A1".to_string()])
        .await;
    portal
        .freeze_students(
            &resolution.found,
            &FreezePayload::new("hold"),
            &NotifyOptions::silent(),
            &actor(),
        )
        .await
        .unwrap();

    // Overwrite the student document wholesale.
    store
        .insert(STUDENTS_COLLECTION, "doc0", student_doc("A1"))
        .await;

    let logs = portal.freeze_logs_for("doc0").await.unwrap();
    assert_eq!(logs.len(), 1);
}
