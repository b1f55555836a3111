//! Settings resolved from the environment at cold start.

use std::env;
use std::path::PathBuf;

use log_indexer_repository::config::DEFAULT_SIGNING_SERVICE;
use log_indexer_repository::DomainClientConfig;
use tracing::warn;

use crate::orchestrator::OrchestratorConfig;
use crate::IndexingError;

/// Default prefix of the daily indices.
pub const DEFAULT_INDEX_PREFIX: &str = "aws-waf-log";

/// How documents are delivered to the search domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// One `_bulk` request per object.
    #[default]
    Bulk,
    /// One `_doc` request per log line.
    Document,
}

impl DeliveryMode {
    /// Parse a delivery mode (case-insensitive), `None` if unknown.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "bulk" => Some(Self::Bulk),
            "document" | "doc" | "single" => Some(Self::Document),
            _ => None,
        }
    }

    /// Parse delivery mode from the `DELIVERY_MODE` environment variable.
    ///
    /// Defaults to "bulk" if not set or invalid.
    fn from_env() -> Self {
        match env::var("DELIVERY_MODE") {
            Ok(value) => Self::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "Invalid DELIVERY_MODE, defaulting to 'bulk'");
                Self::Bulk
            }),
            Err(_) => Self::Bulk,
        }
    }
}

/// Indexer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    pub domain_endpoint: String,
    pub index_prefix: String,
    pub region: String,
    /// Informational only.
    pub account_id: Option<String>,
    pub signing_service: String,
    pub delivery_mode: DeliveryMode,
    /// Send one signed `GET /` during start-up.
    pub verify_domain_on_start: bool,
    pub scratch_dir: Option<PathBuf>,
}

impl IndexerConfig {
    /// Read the settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DOMAIN_ENDPOINT`: Search domain base URL (required)
    /// - `INDEX_PREFIX`: Index name prefix (default: "aws-waf-log")
    /// - `AWS_REGION` or `REGION`: Signing region (required)
    /// - `ACCOUNT_ID`: Account identifier, logged only
    /// - `SIGNING_SERVICE`: SigV4 service name (default: "es")
    /// - `DELIVERY_MODE`: "bulk" or "document" (default: bulk)
    /// - `VERIFY_DOMAIN_ON_START`: "true" to check the domain at start-up (default: false)
    /// - `TEMP_DIR`: Parent of the per-object scratch directories
    ///
    /// # Returns
    ///
    /// * `Ok(IndexerConfig)` - Resolved settings
    /// * `Err(IndexingError)` - If a required variable is missing or empty
    pub fn from_env() -> Result<Self, IndexingError> {
        let domain_endpoint = non_empty_var("DOMAIN_ENDPOINT")
            .ok_or_else(|| IndexingError::config("DOMAIN_ENDPOINT is not set"))?;
        let region = non_empty_var("AWS_REGION")
            .or_else(|| non_empty_var("REGION"))
            .ok_or_else(|| IndexingError::config("AWS_REGION or REGION is not set"))?;

        Ok(Self {
            domain_endpoint,
            index_prefix: non_empty_var("INDEX_PREFIX")
                .unwrap_or_else(|| DEFAULT_INDEX_PREFIX.to_string()),
            region,
            account_id: non_empty_var("ACCOUNT_ID"),
            signing_service: non_empty_var("SIGNING_SERVICE")
                .unwrap_or_else(|| DEFAULT_SIGNING_SERVICE.to_string()),
            delivery_mode: DeliveryMode::from_env(),
            verify_domain_on_start: non_empty_var("VERIFY_DOMAIN_ON_START")
                .map(|value| value.eq_ignore_ascii_case("true") || value == "1")
                .unwrap_or(false),
            scratch_dir: non_empty_var("TEMP_DIR").map(PathBuf::from),
        })
    }

    /// Connection settings for the domain client.
    pub fn domain_client_config(&self) -> DomainClientConfig {
        DomainClientConfig::new(&self.domain_endpoint, &self.region)
            .with_service_name(&self.signing_service)
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            delivery_mode: self.delivery_mode,
            scratch_dir: self.scratch_dir.clone(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
