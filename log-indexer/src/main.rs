//! Log Indexer Main Entry Point
//!
//! Function handler invoked with S3 notifications, either directly or wrapped
//! in SQS messages. Each invocation indexes the referenced log objects into
//! OpenSearch.

use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use lambda_runtime::{run, service_fn, LambdaEvent};
use log_indexer::{Dependencies, IndexingError, IngestReport, Orchestrator};
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// JSON output when running inside Lambda or with `LOG_FORMAT=json`, pretty
/// console output otherwise.
fn init_tracing() -> Result<(), IndexingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("log_indexer=info,log_indexer_repository=info")
    });

    let json = env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok()
        || env::var("LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .without_time(),
            )
            .try_init()
            .map_err(|e| IndexingError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "log-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
            .map_err(|e| IndexingError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "log-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

/// Handle one invocation.
async fn handle_event(
    orchestrator: &Orchestrator,
    event: LambdaEvent<Value>,
) -> Result<IngestReport, lambda_runtime::Error> {
    info!(request_id = %event.context.request_id, "Received invocation");

    Ok(orchestrator.process(&event.payload).await?)
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting log indexer");

    let deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let orchestrator = Arc::new(deps.orchestrator);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let orchestrator = Arc::clone(&orchestrator);
        async move { handle_event(&orchestrator, event).await }
    }))
    .await
    .map_err(|e| {
        error!(error = %e, "Function runtime stopped");
        IndexingError::runtime(e.to_string())
    })
}
