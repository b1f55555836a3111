//! Interface definitions for the domain client and the object store.
//!
//! These traits allow the pipeline to be wired with the AWS-backed
//! implementations in production and with in-memory doubles in tests.

mod domain_client;
mod object_store;

pub use domain_client::{DomainClient, JSON_CONTENT_TYPE};
pub use object_store::ObjectStore;
