//! Normalizer module for the log indexer ingest.
//!
//! Decodes the trigger payload once, at the boundary, and turns it into the
//! sequence of objects to index.

mod decode;
mod event_normalizer;

pub use decode::{decode_batch, decode_queue_body};
pub use event_normalizer::EventNormalizer;
