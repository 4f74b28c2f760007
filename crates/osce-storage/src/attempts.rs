//! Attempt persistence.
//!
//! Each completed attempt is one JSON object under `attempts/`, written once
//! with a create-only precondition and never updated.

use aws_sdk_s3::Client;
use tracing::info;

use osce_core::BoxFuture;
use osce_core::models::attempt::AttemptRecord;
use osce_core::s3_keys;

use crate::error::StorageError;
use crate::objects;

pub trait AttemptStore: Send + Sync {
    /// Persist a completed attempt. Called exactly once per attempt.
    fn insert<'a>(&'a self, record: &'a AttemptRecord) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Most recent attempts first, at most `limit` of them.
    fn list_recent(&self, limit: usize) -> BoxFuture<'_, Result<Vec<AttemptRecord>, StorageError>>;
}

/// Attempt store backed by an S3 bucket.
#[derive(Clone)]
pub struct S3AttemptStore {
    client: Client,
    bucket: String,
}

impl S3AttemptStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl AttemptStore for S3AttemptStore {
    fn insert<'a>(&'a self, record: &'a AttemptRecord) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let key = s3_keys::attempt(record.id);
            let body = serde_json::to_vec_pretty(record)?;
            objects::put_object_if_absent(
                &self.client,
                &self.bucket,
                &key,
                body,
                Some("application/json"),
            )
            .await?;

            info!(
                attempt_id = %record.id,
                scenario_id = %record.scenario_id,
                score = record.score,
                "attempt saved"
            );
            Ok(())
        })
    }

    fn list_recent(&self, limit: usize) -> BoxFuture<'_, Result<Vec<AttemptRecord>, StorageError>> {
        Box::pin(async move {
            let mut metas =
                objects::list_objects_with_metadata(&self.client, &self.bucket, s3_keys::ATTEMPTS_PREFIX)
                    .await?;
            metas.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

            let mut records = Vec::new();
            for meta in metas.into_iter().take(limit) {
                let body = objects::get_object(&self.client, &self.bucket, &meta.key).await?;
                let record: AttemptRecord = serde_json::from_slice(&body)?;
                records.push(record);
            }

            // Keys carry no ordering, and S3 timestamps have one-second
            // resolution; settle ties on the record's own timestamp.
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(records)
        })
    }
}
