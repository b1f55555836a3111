//! Error types for the log indexer repository.

mod domain_client_error;
mod object_store_error;

pub use domain_client_error::DomainClientError;
pub use object_store_error::ObjectStoreError;
