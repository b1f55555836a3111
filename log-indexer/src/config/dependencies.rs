//! Dependency initialization and wiring for the log indexer.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::info;

use crate::config::IndexerConfig;
use crate::loader::DomainLoader;
use crate::normalizer::EventNormalizer;
use crate::orchestrator::Orchestrator;
use crate::router::IndexRouter;
use crate::IndexingError;
use log_indexer_repository::{S3ObjectStore, SignedOpenSearchClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The settings the dependencies were built from.
    pub config: IndexerConfig,
    /// The configured orchestrator, shared by every invocation.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Built once per cold start. See [`IndexerConfig::from_env`] for the
    /// variables read.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the settings are incomplete, the client cannot
    ///   be built, or the optional domain check fails
    pub async fn new() -> Result<Self, IndexingError> {
        let config = IndexerConfig::from_env()?;

        info!(
            domain_endpoint = %config.domain_endpoint,
            index_prefix = %config.index_prefix,
            region = %config.region,
            account_id = config.account_id.as_deref().unwrap_or("unknown"),
            signing_service = %config.signing_service,
            delivery_mode = ?config.delivery_mode,
            "Initializing dependencies"
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self::from_sdk_config(config, &sdk_config).await
    }

    /// Wire the dependencies against an already loaded AWS config.
    pub async fn from_sdk_config(
        config: IndexerConfig,
        sdk_config: &SdkConfig,
    ) -> Result<Self, IndexingError> {
        let client = SignedOpenSearchClient::new(config.domain_client_config(), sdk_config)
            .map_err(|e| {
                IndexingError::config(format!("Failed to create domain client: {}", e))
            })?;
        let store = S3ObjectStore::new(sdk_config);

        let orchestrator = Orchestrator::with_config(
            EventNormalizer::new(),
            IndexRouter::new(&config.index_prefix),
            DomainLoader::new(Arc::new(client)),
            Arc::new(store),
            config.orchestrator_config(),
        );

        if config.verify_domain_on_start {
            orchestrator.loader().check_ready().await.map_err(|e| {
                IndexingError::config(format!("Search domain check failed: {}", e))
            })?;
        }

        info!("Dependencies initialized");

        Ok(Self {
            config,
            orchestrator,
        })
    }
}
