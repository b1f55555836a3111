//! OpenSearch implementation of the domain client.
//!
//! Requests are signed with AWS Signature Version 4 by the `opensearch`
//! transport, using the credentials provider of the ambient AWS config.

mod client;

pub use client::SignedOpenSearchClient;
