//! Decoding of raw trigger payloads into [`TriggerBatch`].

use log_indexer_shared::{
    QueueBody, S3EventRecord, TriggerBatch, TriggerRecord, S3_EVENT_SOURCE, S3_TEST_EVENT,
    SQS_EVENT_SOURCE,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::IngestError;

/// Body of an SQS message carrying S3 notifications.
#[derive(Debug, Deserialize)]
struct RawQueueBody {
    #[serde(rename = "Event")]
    event: Option<String>,
    #[serde(rename = "Records")]
    records: Option<Vec<S3EventRecord>>,
}

/// Decode a whole invocation payload.
///
/// Every record is checked before anything is returned, so a bad record
/// anywhere in the batch fails the invocation before any object is touched.
///
/// # Returns
///
/// * `Ok(TriggerBatch)` - The decoded records, in payload order
/// * `Err(IngestError)` - `UnsupportedEventSource`, `MalformedQueueBody` or `MalformedEvent`
#[instrument(skip_all)]
pub fn decode_batch(payload: &Value) -> Result<TriggerBatch, IngestError> {
    let records = payload
        .get("Records")
        .and_then(Value::as_array)
        .ok_or_else(|| IngestError::malformed_event("payload has no Records array"))?;

    let records = records
        .iter()
        .map(decode_record)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(record_count = records.len(), "Decoded trigger batch");
    Ok(TriggerBatch::new(records))
}

fn decode_record(record: &Value) -> Result<TriggerRecord, IngestError> {
    let source = record
        .get("eventSource")
        .and_then(Value::as_str)
        .ok_or_else(|| IngestError::malformed_event("record has no eventSource"))?;

    match source {
        S3_EVENT_SOURCE => serde_json::from_value::<S3EventRecord>(record.clone())
            .map(TriggerRecord::Storage)
            .map_err(|e| IngestError::malformed_event(format!("invalid S3 record: {}", e))),
        SQS_EVENT_SOURCE => {
            let body = record
                .get("body")
                .and_then(Value::as_str)
                .ok_or_else(|| IngestError::malformed_body("queue record has no body"))?;
            decode_queue_body(body).map(TriggerRecord::Queue)
        }
        other => Err(IngestError::unsupported_source(other)),
    }
}

/// Decode the JSON body of a queue message.
///
/// The inner records are read as storage notifications whatever their own
/// `eventSource` says.
pub fn decode_queue_body(body: &str) -> Result<QueueBody, IngestError> {
    let raw: RawQueueBody =
        serde_json::from_str(body).map_err(|e| IngestError::malformed_body(e.to_string()))?;

    if raw.event.as_deref() == Some(S3_TEST_EVENT) {
        return Ok(QueueBody::TestEvent);
    }

    match raw.records {
        Some(records) => Ok(QueueBody::Notifications(records)),
        None => Err(IngestError::malformed_body(
            "body has neither a test event nor Records",
        )),
    }
}
