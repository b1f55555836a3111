//! Router module for the log indexer ingest.
//!
//! Extracts the event time of a log line and maps calendar dates to daily
//! index names.

mod index_router;
mod timestamp;

pub use index_router::IndexRouter;
pub use timestamp::{extract_timestamp, TIMESTAMP_FIELD};
