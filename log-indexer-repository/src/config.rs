//! Configuration for the domain client.

/// Service identifier used when signing requests to an OpenSearch Service domain.
pub const DEFAULT_SIGNING_SERVICE: &str = "es";

/// Connection settings for the search domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainClientConfig {
    /// Base URL of the domain with any single trailing slash removed.
    endpoint: String,
    /// Region the signature is scoped to.
    pub region: String,
    /// Service identifier the signature is scoped to.
    pub service_name: String,
}

impl DomainClientConfig {
    /// Create a config for `endpoint` in `region`, signing for the `es` service.
    ///
    /// A single trailing slash on the endpoint is stripped.
    pub fn new(endpoint: impl Into<String>, region: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        if endpoint.ends_with('/') {
            endpoint.pop();
        }

        Self {
            endpoint,
            region: region.into(),
            service_name: DEFAULT_SIGNING_SERVICE.to_string(),
        }
    }

    /// Override the signing service identifier (e.g. `aoss` for serverless collections).
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// The normalized base endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Join the endpoint and a request path with exactly one `/`.
    ///
    /// A leading slash on `path` is optional: `"/_bulk"` and `"_bulk"` map to the same URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.strip_prefix('/').unwrap_or(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_single_trailing_slash() {
        let config = DomainClientConfig::new("https://search-logs.eu-west-1.es.amazonaws.com/", "eu-west-1");
        assert_eq!(config.endpoint(), "https://search-logs.eu-west-1.es.amazonaws.com");
    }

    #[test]
    fn test_strips_only_one_trailing_slash() {
        let config = DomainClientConfig::new("https://domain//", "us-east-1");
        assert_eq!(config.endpoint(), "https://domain/");
    }

    #[test]
    fn test_endpoint_without_trailing_slash_is_unchanged() {
        let config = DomainClientConfig::new("https://domain", "us-east-1");
        assert_eq!(config.endpoint(), "https://domain");
    }

    #[test]
    fn test_url_for_joins_with_one_slash() {
        let config = DomainClientConfig::new("https://domain/", "us-east-1");
        assert_eq!(config.url_for("/_bulk"), "https://domain/_bulk");
        assert_eq!(config.url_for("_bulk"), "https://domain/_bulk");
        assert_eq!(
            config.url_for("aws-waf-log-2024-1-5/_doc"),
            "https://domain/aws-waf-log-2024-1-5/_doc"
        );
        assert_eq!(config.url_for(""), "https://domain/");
    }

    #[test]
    fn test_default_service_name() {
        let config = DomainClientConfig::new("https://domain", "us-east-1");
        assert_eq!(config.service_name, "es");

        let config = config.with_service_name("aoss");
        assert_eq!(config.service_name, "aoss");
    }
}
