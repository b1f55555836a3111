//! Signed OpenSearch domain client.

use async_trait::async_trait;
use aws_config::SdkConfig;
use opensearch::{
    auth::Credentials,
    http::{
        headers::{HeaderMap, HeaderName, HeaderValue},
        transport::{SingleNodeConnectionPool, TransportBuilder},
        Method,
    },
    OpenSearch,
};
use tracing::{debug, info};
use url::Url;

use crate::config::DomainClientConfig;
use crate::errors::DomainClientError;
use crate::interfaces::DomainClient;
use crate::types::{HttpMethod, UploadResult};

/// Domain client that signs every request with SigV4.
///
/// The transport holds the credentials *provider* of the AWS config, not a
/// snapshot of its keys: each request is signed with whatever credentials the
/// provider currently hands out, so rotated session tokens are picked up
/// without rebuilding the client.
///
/// # Example
///
/// ```ignore
/// let sdk_config = aws_config::load_from_env().await;
/// let config = DomainClientConfig::new("https://search-logs.eu-west-1.es.amazonaws.com", "eu-west-1");
/// let client = SignedOpenSearchClient::new(config, &sdk_config)?;
/// client.bulk_upload(payload).await?;
/// ```
pub struct SignedOpenSearchClient {
    client: OpenSearch,
    config: DomainClientConfig,
}

impl SignedOpenSearchClient {
    /// Create a client for the configured domain.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, region and signing service
    /// * `sdk_config` - AWS config supplying the credentials provider and region
    ///
    /// # Returns
    ///
    /// * `Ok(SignedOpenSearchClient)` - A new client
    /// * `Err(DomainClientError)` - If the endpoint is not a URL or the AWS config has no credentials
    pub fn new(
        config: DomainClientConfig,
        sdk_config: &SdkConfig,
    ) -> Result<Self, DomainClientError> {
        // Trailing slash so that relative request paths are appended to any base path.
        let url = Url::parse(&config.url_for(""))
            .map_err(|e| DomainClientError::connection(format!("Invalid endpoint: {}", e)))?;

        let credentials: Credentials = sdk_config.clone().try_into().map_err(|e| {
            DomainClientError::connection(format!("Failed to load AWS credentials: {}", e))
        })?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let transport = TransportBuilder::new(conn_pool)
            .auth(credentials)
            .service_name(&config.service_name)
            .disable_proxy()
            .build()
            .map_err(|e| DomainClientError::connection(e.to_string()))?;

        info!(
            endpoint = %config.endpoint(),
            region = %config.region,
            service = %config.service_name,
            "Created signed OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            config,
        })
    }

    fn to_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::Get,
            HttpMethod::Head => Method::Head,
            HttpMethod::Delete => Method::Delete,
            HttpMethod::Put => Method::Put,
            HttpMethod::Post => Method::Post,
        }
    }

    fn header_map(headers: &[(&str, &str)]) -> Result<HeaderMap, DomainClientError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| DomainClientError::invalid_header(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| DomainClientError::invalid_header(format!("{}: {}", name, e)))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }

    fn request_path(path: &str) -> String {
        format!("/{}", path.strip_prefix('/').unwrap_or(path))
    }
}

#[async_trait]
impl DomainClient for SignedOpenSearchClient {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<UploadResult, DomainClientError> {
        let header_map = Self::header_map(headers)?;

        debug!(
            method = %method,
            url = %self.config.url_for(path),
            body_bytes = body.as_ref().map(String::len).unwrap_or(0),
            "Sending signed request"
        );

        let response = self
            .client
            .send(
                Self::to_method(method),
                &Self::request_path(path),
                header_map,
                None::<&()>,
                body,
                None,
            )
            .await
            .map_err(|e| DomainClientError::transport(e.to_string()))?;

        let status_code = response.status_code().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainClientError::transport(e.to_string()))?;

        Ok(UploadResult::new(status_code, body))
    }
}
