//! Integration tests against a real bucket.
//!
//! These require valid AWS credentials and a scratch bucket named in
//! `OSCE_TEST_BUCKET`.
//!
//! Run with: `cargo test -p osce-storage --test attempts -- --ignored`

use osce_core::models::attempt::{AttemptRecord, Grade};
use osce_storage::attempts::{AttemptStore, S3AttemptStore};
use osce_storage::error::StorageError;

fn record() -> AttemptRecord {
    AttemptRecord {
        id: uuid::Uuid::new_v4(),
        student_name: "integration-test".to_string(),
        scenario_id: "chest_pain".to_string(),
        score: 56,
        grade: Grade::Fail,
        feedback: "History: ok\n\nViva: ok".to_string(),
        transcript: "STUDENT: Hello.".to_string(),
        created_at: jiff::Timestamp::now(),
    }
}

async fn store() -> S3AttemptStore {
    let bucket = std::env::var("OSCE_TEST_BUCKET").expect("OSCE_TEST_BUCKET must be set");
    S3AttemptStore::new(osce_storage::client::build_client().await, bucket)
}

#[tokio::test]
#[ignore]
async fn attempt_is_written_once() {
    let store = store().await;
    let record = record();

    store.insert(&record).await.unwrap();

    let err = store.insert(&record).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { .. }));

    let recent = store.list_recent(50).await.unwrap();
    assert!(recent.iter().any(|r| r.id == record.id));
}
