//! Core data structures used across the log indexer.

pub mod index_name;
pub mod object_reference;
pub mod trigger_event;

pub use index_name::IndexName;
pub use object_reference::ObjectReference;
pub use trigger_event::{QueueBody, S3EventRecord, TriggerBatch, TriggerRecord};
