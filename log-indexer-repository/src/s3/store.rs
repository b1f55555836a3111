use std::path::Path;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::ObjectStoreError;
use crate::interfaces::ObjectStore;

/// Object store backed by the S3 `GetObject` API.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    /// Create a store using the region and credentials of `sdk_config`.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn download(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> Result<u64, ObjectStoreError> {
        debug!(bucket = %bucket, key = %key, "Fetching object from S3");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                ObjectStoreError::download(bucket, key, DisplayErrorContext(&e).to_string())
            })?;

        let mut file = File::create(destination)
            .await
            .map_err(|e| ObjectStoreError::io(destination, e))?;

        // The body is streamed to disk; objects are never held in memory whole.
        let mut body = response.body.into_async_read();
        let written = tokio::io::copy(&mut body, &mut file)
            .await
            .map_err(|e| ObjectStoreError::download(bucket, key, e.to_string()))?;

        file.flush()
            .await
            .map_err(|e| ObjectStoreError::io(destination, e))?;

        debug!(
            bucket = %bucket,
            key = %key,
            bytes = written,
            path = %destination.display(),
            "Downloaded object"
        );
        Ok(written)
    }
}
