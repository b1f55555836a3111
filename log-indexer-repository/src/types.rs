//! Request and response types for domain operations.

use std::fmt;

use serde_json::Value;

use crate::errors::DomainClientError;

/// HTTP verbs accepted by [`DomainClient::request`](crate::DomainClient::request).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Delete,
    Put,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Delete => "DELETE",
            Self::Put => "PUT",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status code and body of a domain response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub status_code: u16,
    pub body: String,
}

impl UploadResult {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Whether the status code is below 300.
    pub fn is_success(&self) -> bool {
        self.status_code < 300
    }
}

/// Per-item outcome of a `_bulk` response.
///
/// The bulk API answers 200 even when individual items are rejected; the
/// `errors` flag and the per-item `status` report those rejections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSummary {
    /// Milliseconds the domain spent on the request.
    pub took: u64,
    /// Number of items in the response.
    pub total: usize,
    /// Number of items with a status of 300 or above.
    pub failed: usize,
    /// Reason of the first rejected item, if any.
    pub first_error: Option<String>,
}

impl BulkSummary {
    /// Parse a `_bulk` response body.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Item counts extracted from the body
    /// * `Err(DomainClientError)` - If the body is not a bulk response
    pub fn from_response_body(body: &str) -> Result<Self, DomainClientError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| DomainClientError::parse(e.to_string()))?;

        let items = value
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| DomainClientError::parse("bulk response has no items array"))?;

        let mut failed = 0;
        let mut first_error = None;
        for item in items {
            // Each item is a single-key object: {"index": {...}}, {"create": {...}}, ...
            let Some(outcome) = item.as_object().and_then(|op| op.values().next()) else {
                continue;
            };
            let status = outcome.get("status").and_then(Value::as_u64).unwrap_or(0);
            if status >= 300 || outcome.get("error").is_some() {
                failed += 1;
                if first_error.is_none() {
                    first_error = outcome.get("error").map(Self::describe_error);
                }
            }
        }

        Ok(Self {
            took: value.get("took").and_then(Value::as_u64).unwrap_or(0),
            total: items.len(),
            failed,
            first_error,
        })
    }

    /// Number of items that were indexed.
    pub fn succeeded(&self) -> usize {
        self.total - self.failed
    }

    fn describe_error(error: &Value) -> String {
        match (
            error.get("type").and_then(Value::as_str),
            error.get("reason").and_then(Value::as_str),
        ) {
            (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
            (Some(kind), None) => kind.to_string(),
            _ => error.to_string(),
        }
    }
}
