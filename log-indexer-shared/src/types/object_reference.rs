//! Location of an object to index.

use serde::{Deserialize, Serialize};

use crate::types::trigger_event::S3EventRecord;

/// File name used for the local copy when the key has no final path segment.
const DEFAULT_FILE_NAME: &str = "object";

/// Reference to a stored object that passed the creation and size filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    pub bucket: String,
    /// Decoded object key.
    pub key: String,
    pub size_bytes: u64,
}

impl ObjectReference {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            size_bytes,
        }
    }

    /// Build a reference from a notification record, decoding the object key.
    pub fn from_record(record: &S3EventRecord) -> Self {
        Self {
            bucket: record.s3.bucket.name.clone(),
            key: record.s3.object.decoded_key(),
            size_bytes: record.s3.object.size,
        }
    }

    /// Last path segment of the key, used to name the local copy.
    pub fn file_name(&self) -> &str {
        match self.key.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_FILE_NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let reference = ObjectReference::new("b", "AWSLogs/2024/01/05/a.json", 10);
        assert_eq!(reference.file_name(), "a.json");
    }

    #[test]
    fn test_file_name_without_directory() {
        let reference = ObjectReference::new("b", "a.json", 10);
        assert_eq!(reference.file_name(), "a.json");
    }

    #[test]
    fn test_file_name_for_trailing_slash() {
        let reference = ObjectReference::new("b", "logs/", 10);
        assert_eq!(reference.file_name(), "object");
    }

    #[test]
    fn test_from_record_decodes_key() {
        let record = S3EventRecord::new("ObjectCreated:Put", "logs", "dir/my+file.json", 42);
        let reference = ObjectReference::from_record(&record);
        assert_eq!(reference, ObjectReference::new("logs", "dir/my file.json", 42));
    }
}
