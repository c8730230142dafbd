//! Integration tests for roll-number resolution at scale

use crate::common::fixtures::{actor, fast_config, seed_students};
use placement_portal::{
    FreezePayload, MemoryStore, NotifyOptions, Portal, RecordingDispatcher, STUDENTS_COLLECTION,
    parse_tabular,
};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn tabular_upload_resolves_and_freezes_beyond_one_query_chunk() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());

    let rolls: Vec<String> = (0..25).map(|i| format!("R{i:03}")).collect();
    let refs: Vec<&str> = rolls.iter().map(String::as_str).collect();
    seed_students(&store, &refs).await;

    let portal = Portal::new(store.clone(), dispatcher.clone(), &fast_config());

    // A CSV export with a header row, as the wizard uploads it.
    let mut csv = String::from("roll_number,name\n");
    for roll in &rolls {
        csv.push_str(&format!("{roll},Student {roll}\n"));
    }
    let parsed = parse_tabular(&csv, true);
    assert_eq!(parsed.len(), 25);

    // 25 identifiers cross the 10-key query cap; resolution must chunk.
    let resolution = portal.resolve_students_by_roll(&parsed).await;
    assert_eq!(resolution.found.len(), 25);
    assert!(resolution.missing.is_empty());

    let result = portal
        .freeze_students(
            &resolution.found,
            &FreezePayload::new("placement season hold"),
            &NotifyOptions::default(),
            &actor(),
        )
        .await
        .unwrap();

    assert_eq!(result.successful, 25);
    assert_eq!(result.failed, 0);
    assert_eq!(dispatcher.sent().await.len(), 25);
}

#[tokio::test]
async fn duplicate_store_records_warn_but_never_block() {
    let store = Arc::new(MemoryStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());
    seed_students(&store, &["A1", "B2"]).await;
    // A second record carrying A1's business key.
    store
        .insert(
            STUDENTS_COLLECTION,
            "zz_shadow",
            json!({
                "rollNumber": "A1",
                "name": "Shadow",
                "email": "shadow@example.edu",
                "freezed": null,
                "freezeHistory": [],
            }),
        )
        .await;

    let portal = Portal::new(store.clone(), dispatcher.clone(), &fast_config());

    let resolution = portal
        .resolve_students_by_roll(&["A1".to_string(), "B2".to_string()])
        .await;

    // The first record wins; the extra one is surfaced, not fatal.
    assert_eq!(resolution.found.len(), 2);
    assert_eq!(resolution.duplicates.len(), 1);
    assert_eq!(resolution.duplicates[0].record_id, "zz_shadow");

    let result = portal
        .freeze_students(
            &resolution.found,
            &FreezePayload::new("hold"),
            &NotifyOptions::silent(),
            &actor(),
        )
        .await
        .unwrap();
    assert_eq!(result.successful, 2);

    // Only the winning record was mutated.
    let shadow = store.get(STUDENTS_COLLECTION, "zz_shadow").await.unwrap();
    assert_eq!(shadow["freezed"], json!(null));
}
