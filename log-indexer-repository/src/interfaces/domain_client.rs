//! Search domain client trait definition.

use async_trait::async_trait;
use log_indexer_shared::IndexName;
use serde_json::Value;

use crate::errors::DomainClientError;
use crate::types::{HttpMethod, UploadResult};

/// `Content-Type` header sent with document and bulk uploads.
pub const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Authenticated access to the search domain's REST API.
///
/// Implementations only provide [`send`](DomainClient::send), which signs and
/// transmits one request and reports the response as-is. The provided methods
/// layer the status policy and the document operations on top of it, so every
/// implementation maps non-2xx responses to failures the same way.
///
/// There is no retry at this layer.
#[async_trait]
pub trait DomainClient: Send + Sync {
    /// Sign and send one request, returning the response whatever its status.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP verb
    /// * `path` - Path relative to the domain endpoint, with or without a leading `/`
    /// * `headers` - Extra request headers
    /// * `body` - Optional request body
    ///
    /// # Returns
    ///
    /// * `Ok(UploadResult)` - Status code and body of the response
    /// * `Err(DomainClientError)` - If the request could not be signed, sent or read
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<UploadResult, DomainClientError>;

    /// Send a request and fail with `UnexpectedStatus` on a status code of 300 or above.
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<UploadResult, DomainClientError> {
        let result = self.send(method, path, headers, body).await?;
        if !result.is_success() {
            return Err(DomainClientError::unexpected_status(
                result.status_code,
                result.body,
            ));
        }
        Ok(result)
    }

    /// Index one JSON document with `POST {index}/_doc`.
    async fn upload_document(
        &self,
        index: &IndexName,
        document: &str,
    ) -> Result<UploadResult, DomainClientError> {
        self.request(
            HttpMethod::Post,
            &format!("{}/_doc", index),
            &[JSON_CONTENT_TYPE],
            Some(document.to_string()),
        )
        .await
    }

    /// Submit an NDJSON payload with `POST /_bulk`.
    ///
    /// Every action line in the payload names its own target index.
    async fn bulk_upload(&self, payload: String) -> Result<UploadResult, DomainClientError> {
        self.request(
            HttpMethod::Post,
            "/_bulk",
            &[JSON_CONTENT_TYPE],
            Some(payload),
        )
        .await
    }

    /// Fetch the domain's root document (cluster name and version) with `GET /`.
    async fn domain_info(&self) -> Result<Value, DomainClientError> {
        let result = self.request(HttpMethod::Get, "", &[], None).await?;
        serde_json::from_str(&result.body).map_err(|e| DomainClientError::parse(e.to_string()))
    }
}
