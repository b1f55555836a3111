//! # Log Indexer Repository
//!
//! This crate provides the traits and implementations the log indexer uses to
//! talk to the outside world: a request-signing client for the OpenSearch
//! domain and a download primitive for S3 objects.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod s3;
pub mod types;

pub use config::DomainClientConfig;
pub use errors::{DomainClientError, ObjectStoreError};
pub use interfaces::{DomainClient, ObjectStore};
pub use opensearch::SignedOpenSearchClient;
pub use s3::S3ObjectStore;
pub use types::{BulkSummary, HttpMethod, UploadResult};
