//! Loader module for the log indexer ingest.
//!
//! Delivers documents to the search domain and logs what the domain answered.

use std::sync::Arc;

use log_indexer_repository::{BulkSummary, DomainClient, UploadResult};
use log_indexer_shared::IndexName;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::bulk::BulkPayload;
use crate::errors::IngestError;

/// Loader that sends documents through a [`DomainClient`].
///
/// The loader does not retry; a failed upload is returned to the caller as
/// `IngestError::UploadFailure`.
pub struct DomainLoader {
    client: Arc<dyn DomainClient>,
}

impl DomainLoader {
    /// Create a new loader with the given client.
    pub fn new(client: Arc<dyn DomainClient>) -> Self {
        Self { client }
    }

    /// Upload a finished bulk payload in a single request.
    ///
    /// Items rejected inside a successful bulk response are logged, not raised.
    #[instrument(skip(self, payload), fields(documents = payload.documents()))]
    pub async fn load_bulk(
        &self,
        key: &str,
        payload: BulkPayload,
    ) -> Result<UploadResult, IngestError> {
        let documents = payload.documents();

        let result = match self.client.bulk_upload(payload.into_body()).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, key = %key, documents = documents, "Bulk upload failed");
                return Err(e.into());
            }
        };

        info!(status = result.status_code, body = %result.body, "Response");

        match BulkSummary::from_response_body(&result.body) {
            Ok(summary) if summary.failed > 0 => {
                warn!(
                    key = %key,
                    succeeded = summary.succeeded(),
                    failed = summary.failed,
                    first_error = summary.first_error.as_deref().unwrap_or("unknown"),
                    "Bulk upload completed with some failures"
                );
            }
            Ok(summary) => {
                debug!(count = summary.total, took_ms = summary.took, "Bulk upload succeeded");
            }
            Err(e) => {
                warn!(error = %e, "Could not parse bulk response");
            }
        }

        Ok(result)
    }

    /// Upload a single document into `index`.
    pub async fn load_document(
        &self,
        index: &IndexName,
        document: &str,
    ) -> Result<UploadResult, IngestError> {
        match self.client.upload_document(index, document).await {
            Ok(result) => {
                debug!(index = %index, status = result.status_code, body = %result.body, "Response");
                Ok(result)
            }
            Err(e) => {
                error!(error = %e, index = %index, "Document upload failed");
                Err(e.into())
            }
        }
    }

    /// Check that the domain answers signed requests.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The domain's root document
    /// * `Err(IngestError)` - If the domain rejected or did not answer the request
    pub async fn check_ready(&self) -> Result<Value, IngestError> {
        let info = self.client.domain_info().await?;
        info!(
            cluster_name = info["cluster_name"].as_str().unwrap_or("unknown"),
            version = info["version"]["number"].as_str().unwrap_or("unknown"),
            "Search domain is reachable"
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk::BulkPayloadBuilder;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use log_indexer_repository::{DomainClientError, HttpMethod};
    use std::sync::Mutex;

    /// Mock domain client answering every request with a fixed response.
    struct MockDomainClient {
        status: u16,
        body: String,
        paths: Mutex<Vec<String>>,
    }

    impl MockDomainClient {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.to_string(),
                paths: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DomainClient for MockDomainClient {
        async fn send(
            &self,
            _method: HttpMethod,
            path: &str,
            _headers: &[(&str, &str)],
            _body: Option<String>,
        ) -> Result<UploadResult, DomainClientError> {
            self.paths.lock().unwrap().push(path.to_string());
            Ok(UploadResult::new(self.status, self.body.clone()))
        }
    }

    fn index() -> IndexName {
        IndexName::for_date("aws-waf-log", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
    }

    fn payload() -> BulkPayload {
        let mut builder = BulkPayloadBuilder::new();
        builder.push(&index(), r#"{"timestamp":1704450030123}"#);
        builder.finish()
    }

    #[tokio::test]
    async fn test_load_bulk() {
        let client = Arc::new(MockDomainClient::new(
            200,
            r#"{"took":2,"errors":false,"items":[{"index":{"status":201}}]}"#,
        ));
        let loader = DomainLoader::new(client.clone());

        let result = loader.load_bulk("logs/a.json", payload()).await.unwrap();
        assert_eq!(result.status_code, 200);
        assert_eq!(*client.paths.lock().unwrap(), vec!["/_bulk".to_string()]);
    }

    #[tokio::test]
    async fn test_load_bulk_with_rejected_items_is_not_an_error() {
        let client = Arc::new(MockDomainClient::new(
            200,
            r#"{"took":2,"errors":true,"items":[{"index":{"status":400,"error":{"type":"mapper_parsing_exception"}}}]}"#,
        ));
        let loader = DomainLoader::new(client);

        assert!(loader.load_bulk("logs/a.json", payload()).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_bulk_failure_status() {
        let client = Arc::new(MockDomainClient::new(503, "Service Unavailable"));
        let loader = DomainLoader::new(client);

        let err = loader.load_bulk("logs/a.json", payload()).await.unwrap_err();
        assert!(matches!(
            err,
            IngestError::UploadFailure(DomainClientError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_load_document() {
        let client = Arc::new(MockDomainClient::new(201, r#"{"result":"created"}"#));
        let loader = DomainLoader::new(client.clone());

        loader.load_document(&index(), "{}").await.unwrap();
        assert_eq!(
            *client.paths.lock().unwrap(),
            vec!["aws-waf-log-2024-1-5/_doc".to_string()]
        );
    }

    #[tokio::test]
    async fn test_check_ready() {
        let client = Arc::new(MockDomainClient::new(
            200,
            r#"{"cluster_name":"123:logs","version":{"number":"2.11.0"}}"#,
        ));
        let loader = DomainLoader::new(client);

        let info = loader.check_ready().await.unwrap();
        assert_eq!(info["cluster_name"], "123:logs");
    }

    #[tokio::test]
    async fn test_check_ready_forbidden() {
        let client = Arc::new(MockDomainClient::new(403, r#"{"message":"forbidden"}"#));
        let loader = DomainLoader::new(client);

        assert!(matches!(
            loader.check_ready().await,
            Err(IngestError::UploadFailure(_))
        ));
    }
}
