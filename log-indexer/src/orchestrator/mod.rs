//! Orchestrator module for the log indexer ingest.
//!
//! Coordinates the normalizer, router, bulk builder and loader for one
//! trigger batch. Objects are handled strictly in order and the first
//! failure aborts the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, instrument, warn};

use log_indexer_repository::{ObjectStore, ObjectStoreError};
use log_indexer_shared::{IndexName, ObjectReference};

use crate::bulk::BulkPayloadBuilder;
use crate::config::DeliveryMode;
use crate::errors::IngestError;
use crate::loader::DomainLoader;
use crate::normalizer::{decode_batch, EventNormalizer};
use crate::router::{extract_timestamp, IndexRouter};

/// Prefix of the per-object scratch directories.
const SCRATCH_PREFIX: &str = "log-indexer-";

/// Configuration for the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// How documents are delivered to the domain.
    pub delivery_mode: DeliveryMode,
    /// Parent of the per-object scratch directories; the system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
}

/// Counters for one successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Objects downloaded and indexed.
    pub objects_indexed: usize,
    /// Documents delivered, across all objects.
    pub documents_indexed: usize,
    /// Storage notifications filtered out (non-create events, empty objects).
    pub records_skipped: usize,
}

/// Orchestrator that coordinates the ingest components.
pub struct Orchestrator {
    normalizer: EventNormalizer,
    router: IndexRouter,
    loader: DomainLoader,
    store: Arc<dyn ObjectStore>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        normalizer: EventNormalizer,
        router: IndexRouter,
        loader: DomainLoader,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self::with_config(
            normalizer,
            router,
            loader,
            store,
            OrchestratorConfig::default(),
        )
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        normalizer: EventNormalizer,
        router: IndexRouter,
        loader: DomainLoader,
        store: Arc<dyn ObjectStore>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            normalizer,
            router,
            loader,
            store,
            config,
        }
    }

    /// The loader, for start-up checks against the domain.
    pub fn loader(&self) -> &DomainLoader {
        &self.loader
    }

    /// Process one trigger payload.
    ///
    /// On failure the error is logged together with the full payload before
    /// it is returned, so the batch can be inspected and replayed.
    ///
    /// # Returns
    ///
    /// * `Ok(IngestReport)` - Every accepted object was indexed
    /// * `Err(IngestError)` - The first failure; later objects were not touched
    pub async fn process(&self, payload: &Value) -> Result<IngestReport, IngestError> {
        match self.process_payload(payload).await {
            Ok(report) => {
                info!(
                    objects_indexed = report.objects_indexed,
                    documents_indexed = report.documents_indexed,
                    records_skipped = report.records_skipped,
                    "Invocation completed"
                );
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, event = %payload, "Failed to process event");
                Err(e)
            }
        }
    }

    async fn process_payload(&self, payload: &Value) -> Result<IngestReport, IngestError> {
        let batch = decode_batch(payload)?;
        debug!(records = batch.len(), "Decoded trigger batch");

        let mut report = IngestReport::default();
        for object in self.normalizer.object_references(&batch) {
            report.documents_indexed += self.process_object(&object).await?;
            report.objects_indexed += 1;
        }

        report.records_skipped =
            EventNormalizer::storage_event_count(&batch).saturating_sub(report.objects_indexed);
        Ok(report)
    }

    /// Download one object, route each of its lines and deliver them.
    ///
    /// Returns the number of documents delivered. The scratch directory is
    /// removed when this returns, whatever the outcome.
    #[instrument(skip(self, object), fields(bucket = %object.bucket, key = %object.key))]
    async fn process_object(&self, object: &ObjectReference) -> Result<usize, IngestError> {
        let scratch = self.scratch_dir()?;
        let path = scratch.path().join(object.file_name());

        let bytes = self
            .store
            .download(&object.bucket, &object.key, &path)
            .await?;
        debug!(bytes = bytes, path = %path.display(), "Downloaded object");

        let file = File::open(&path)
            .await
            .map_err(|e| IngestError::read(&object.key, e))?;
        let mut lines = BufReader::new(file).lines();

        let mut builder = BulkPayloadBuilder::new();
        let mut documents = 0;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| IngestError::read(&object.key, e))?
        {
            let document = line.trim();
            if document.is_empty() {
                continue;
            }

            let index = self.route_line(document);
            match self.config.delivery_mode {
                DeliveryMode::Bulk => builder.push(&index, document),
                DeliveryMode::Document => {
                    self.loader.load_document(&index, document).await?;
                }
            }
            documents += 1;
        }

        if !builder.is_empty() {
            self.loader.load_bulk(&object.key, builder.finish()).await?;
        }

        if documents == 0 {
            info!("Object has no log lines");
        }

        Ok(documents)
    }

    /// Index for one line, falling back to the current date.
    fn route_line(&self, line: &str) -> IndexName {
        let date = match extract_timestamp(line) {
            Ok(timestamp) => timestamp.date_naive(),
            Err(e) => {
                warn!(error = %e, "No usable timestamp, using the current date");
                Utc::now().date_naive()
            }
        };
        self.router.route(date)
    }

    fn scratch_dir(&self) -> Result<TempDir, IngestError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);

        let created = match &self.config.scratch_dir {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        };

        created.map_err(|e| {
            let parent = self
                .config
                .scratch_dir
                .clone()
                .unwrap_or_else(std::env::temp_dir);
            ObjectStoreError::io(Path::new(&parent), e).into()
        })
    }
}
