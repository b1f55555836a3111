//! # Log Indexer Shared
//!
//! This crate defines the plain data structures shared across the log indexer:
//! the shapes of the trigger payloads delivered by the storage and queue
//! services, the object references derived from them, and index names.

pub mod types;

pub use types::index_name::IndexName;
pub use types::object_reference::ObjectReference;
pub use types::trigger_event::{
    QueueBody, S3Bucket, S3Entity, S3EventRecord, S3Object, TriggerBatch, TriggerRecord,
    S3_EVENT_SOURCE, S3_TEST_EVENT, SQS_EVENT_SOURCE,
};
