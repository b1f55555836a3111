//! Object store trait definition.

use std::path::Path;

use async_trait::async_trait;

use crate::errors::ObjectStoreError;

/// Download primitive for stored objects.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream the object at `bucket`/`key` into a new file at `destination`.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of bytes written
    /// * `Err(ObjectStoreError)` - If the object could not be fetched or written
    async fn download(
        &self,
        bucket: &str,
        key: &str,
        destination: &Path,
    ) -> Result<u64, ObjectStoreError>;
}
