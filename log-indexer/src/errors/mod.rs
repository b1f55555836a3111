//! Error types for the log indexer ingest.

use log_indexer_repository::{DomainClientError, ObjectStoreError};
use thiserror::Error;

/// Errors that abort an invocation.
///
/// Every variant is fatal: the first one raised stops the batch and is
/// returned to the runtime, which owns redelivery.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A record carries an `eventSource` the indexer does not handle.
    #[error("Unsupported event source: {0}")]
    UnsupportedEventSource(String),

    /// A queue message body is not JSON or has neither a test event nor records.
    #[error("Malformed queue body: {0}")]
    MalformedQueueBody(String),

    /// A record of a supported source lacks required fields.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// The object could not be downloaded.
    #[error("Download failure: {0}")]
    DownloadFailure(#[from] ObjectStoreError),

    /// The local copy of an object could not be read.
    #[error("Read failure for {key}: {message}")]
    ReadFailure { key: String, message: String },

    /// A document or bulk upload failed.
    #[error("Upload failure: {0}")]
    UploadFailure(#[from] DomainClientError),
}

impl IngestError {
    /// Create an unsupported event source error.
    pub fn unsupported_source(tag: impl Into<String>) -> Self {
        Self::UnsupportedEventSource(tag.into())
    }

    /// Create a malformed queue body error.
    pub fn malformed_body(msg: impl Into<String>) -> Self {
        Self::MalformedQueueBody(msg.into())
    }

    /// Create a malformed event error.
    pub fn malformed_event(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }

    /// Create a read failure for the object at `key`.
    pub fn read(key: &str, err: impl std::fmt::Display) -> Self {
        Self::ReadFailure {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

/// Reasons a log line yields no usable timestamp.
///
/// Always recovered by falling back to the current date.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestampError {
    /// The line is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// The line is JSON but not an object.
    #[error("Line is not a JSON object")]
    NotAnObject,

    /// The object has no `timestamp` field.
    #[error("Missing timestamp field")]
    MissingField,

    /// The field is not an integer, a float or a string of digits.
    #[error("Invalid timestamp value: {0}")]
    InvalidValue(String),

    /// The value does not map to a representable instant.
    #[error("Timestamp out of range: {0}")]
    OutOfRange(i64),
}
