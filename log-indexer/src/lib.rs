//! # Log Indexer
//!
//! Indexes newline-delimited JSON log objects landing in S3 into daily
//! OpenSearch indices.
//!
//! ## Architecture
//!
//! One invocation handles one trigger batch, strictly in order:
//!
//! 1. **Normalizer**: Decodes the trigger payload (direct S3 notifications or
//!    SQS messages wrapping them) and yields the objects to index
//! 2. **Router**: Maps each log line to a `{prefix}-{year}-{month}-{day}` index
//! 3. **Bulk**: Accumulates action/document pairs into one NDJSON body per object
//! 4. **Loader**: Delivers documents through the signed domain client
//! 5. **Orchestrator**: Downloads each object, drives the flow and fails fast
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`normalizer`]: Trigger decoding and object filtering
//! - [`router`]: Timestamp extraction and index routing
//! - [`bulk`]: Bulk payload builder
//! - [`loader`]: Delivery to the search domain
//! - [`orchestrator`]: Coordinates the ingest flow
//! - [`errors`]: Error types for the indexer

pub mod bulk;
pub mod config;
pub mod errors;
pub mod loader;
pub mod normalizer;
pub mod orchestrator;
pub mod router;

pub use config::{Dependencies, DeliveryMode, IndexerConfig};
pub use errors::{IngestError, TimestampError};
pub use orchestrator::{IngestReport, Orchestrator};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),

    /// The function runtime stopped with an error.
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::RuntimeError(msg.into())
    }
}
