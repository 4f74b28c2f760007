use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;

use crate::error::StorageError;

/// Get an object body from S3.
pub async fn get_object(client: &Client, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(body)
}

/// Create an object that must not exist yet (`If-None-Match: *`).
///
/// Returns `StorageError::AlreadyExists` if another writer got there first.
pub async fn put_object_if_absent(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> Result<(), StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .if_none_match("*");

    if let Some(ct) = content_type {
        req = req.content_type(ct);
    }

    req.send().await.map_err(|e| {
        let err = e.into_service_error();
        // S3 answers 412 Precondition Failed when the key is already taken.
        if err.to_string().contains("PreconditionFailed") {
            StorageError::AlreadyExists {
                key: key.to_string(),
            }
        } else {
            StorageError::PutObject(err.to_string())
        }
    })?;

    Ok(())
}

/// Metadata for a single S3 object, returned by [`list_objects_with_metadata`].
pub struct ObjectMeta {
    pub key: String,
    /// Seconds since the Unix epoch.
    pub last_modified: Option<i64>,
}

/// List objects under a prefix with last-modified metadata.
pub async fn list_objects_with_metadata(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<ObjectMeta>, StorageError> {
    let mut objects = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let mut req = client.list_objects_v2().bucket(bucket).prefix(prefix);

        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                objects.push(ObjectMeta {
                    key: key.to_string(),
                    last_modified: obj.last_modified().map(|t| t.secs()),
                });
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(objects)
}
