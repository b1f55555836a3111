//! S3 implementation of the object store.

mod store;

pub use store::S3ObjectStore;
