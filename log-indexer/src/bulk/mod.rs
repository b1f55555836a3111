//! Bulk module for the log indexer ingest.
//!
//! Builds the NDJSON body of a `_bulk` request for one object.

mod payload;

pub use payload::{action_line, BulkPayload, BulkPayloadBuilder};
