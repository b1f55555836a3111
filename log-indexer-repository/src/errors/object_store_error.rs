//! Errors returned by the object store.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while fetching an object to local storage.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// The object could not be fetched or its body could not be streamed.
    #[error("Failed to download s3://{bucket}/{key}: {message}")]
    DownloadError {
        bucket: String,
        key: String,
        message: String,
    },

    /// The local copy could not be written.
    #[error("I/O error on {path}: {message}")]
    IoError { path: String, message: String },
}

impl ObjectStoreError {
    /// Create a download error.
    pub fn download(bucket: &str, key: &str, message: impl Into<String>) -> Self {
        Self::DownloadError {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Create an I/O error for the given local path.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::IoError {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
