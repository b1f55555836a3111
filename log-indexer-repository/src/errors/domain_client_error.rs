//! Errors returned by the domain client.

use thiserror::Error;

/// Errors from requests sent to the search domain.
#[derive(Debug, Clone, Error)]
pub enum DomainClientError {
    /// Failed to set up the client (bad endpoint, missing credentials).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be sent or the response could not be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The domain answered with a status code of 300 or above.
    #[error("Not OK status code: {status} {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A request header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl DomainClientError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create an unexpected status error.
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an invalid header error.
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }

    /// Status code of the failed response, if the domain answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
