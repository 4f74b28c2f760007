use aws_sdk_s3::Client;
use tracing::info;

use osce_core::catalog::ScenarioCatalog;
use osce_core::s3_keys;

use crate::error::StorageError;
use crate::objects;

/// Load the scenario catalog from the bucket, falling back to the bundled
/// stations when no catalog has been uploaded.
///
/// A catalog that exists but fails migration or validation is an error: the
/// service should not start with a rubric it cannot grade.
pub async fn load_catalog(client: &Client, bucket: &str) -> Result<ScenarioCatalog, StorageError> {
    match objects::get_object(client, bucket, s3_keys::SCENARIO_CATALOG).await {
        Ok(body) => {
            let contents = String::from_utf8_lossy(&body);
            let catalog = ScenarioCatalog::from_json(&contents)?;
            info!(scenarios = catalog.len(), "loaded scenario catalog from S3");
            Ok(catalog)
        }
        Err(StorageError::NotFound { .. }) => {
            let catalog = ScenarioCatalog::bundled()?;
            info!(scenarios = catalog.len(), "no uploaded catalog found, using bundled scenarios");
            Ok(catalog)
        }
        Err(e) => Err(e),
    }
}
