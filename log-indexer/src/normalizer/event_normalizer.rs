//! Event normalizer implementation.
//!
//! Collapses direct and queue-wrapped notifications into one stream of
//! [`ObjectReference`]s, dropping events that do not describe a new,
//! non-empty object.

use log_indexer_shared::{ObjectReference, QueueBody, S3EventRecord, TriggerBatch, TriggerRecord};
use tracing::{debug, info};

/// Normalizer that turns a decoded trigger batch into objects to index.
pub struct EventNormalizer {}

impl EventNormalizer {
    /// Create a new event normalizer.
    pub fn new() -> Self {
        Self {}
    }

    /// Lazily yield the objects to index, in batch order.
    pub fn object_references<'a>(
        &'a self,
        batch: &'a TriggerBatch,
    ) -> impl Iterator<Item = ObjectReference> + 'a {
        Self::storage_events(batch).filter_map(move |event| self.accept(event))
    }

    /// Number of storage notifications in the batch, filtered or not.
    pub fn storage_event_count(batch: &TriggerBatch) -> usize {
        batch
            .iter()
            .map(|record| match record {
                TriggerRecord::Storage(_) => 1,
                TriggerRecord::Queue(QueueBody::Notifications(events)) => events.len(),
                TriggerRecord::Queue(QueueBody::TestEvent) => 0,
            })
            .sum()
    }

    fn storage_events(batch: &TriggerBatch) -> impl Iterator<Item = &S3EventRecord> {
        batch.iter().flat_map(|record| {
            let events: &[S3EventRecord] = match record {
                TriggerRecord::Storage(event) => std::slice::from_ref(event),
                TriggerRecord::Queue(QueueBody::Notifications(events)) => events,
                TriggerRecord::Queue(QueueBody::TestEvent) => {
                    info!("Skipping S3 test event");
                    &[]
                }
            };
            events.iter()
        })
    }

    /// Map one notification to an object reference, or `None` if it is filtered out.
    fn accept(&self, event: &S3EventRecord) -> Option<ObjectReference> {
        if !event.is_object_created() {
            info!(event_name = %event.event_name, "Non supported S3 event");
            return None;
        }

        if event.s3.object.size == 0 {
            debug!(
                bucket = %event.s3.bucket.name,
                key = %event.s3.object.key,
                "Skipping zero size object"
            );
            return None;
        }

        Some(ObjectReference::from_record(event))
    }
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(key: &str, size: u64) -> S3EventRecord {
        S3EventRecord::new("ObjectCreated:Put", "waf-logs", key, size)
    }

    #[test]
    fn test_accepts_created_object() {
        let normalizer = EventNormalizer::new();
        let batch = TriggerBatch::new(vec![TriggerRecord::Storage(created("logs/a.json", 120))]);

        let references: Vec<_> = normalizer.object_references(&batch).collect();
        assert_eq!(
            references,
            vec![ObjectReference::new("waf-logs", "logs/a.json", 120)]
        );
    }

    #[test]
    fn test_skips_zero_size_object() {
        let normalizer = EventNormalizer::new();
        let batch = TriggerBatch::new(vec![TriggerRecord::Storage(created("logs/", 0))]);

        assert_eq!(normalizer.object_references(&batch).count(), 0);
        assert_eq!(EventNormalizer::storage_event_count(&batch), 1);
    }

    #[test]
    fn test_skips_non_create_events() {
        let normalizer = EventNormalizer::new();
        let batch = TriggerBatch::new(vec![
            TriggerRecord::Storage(S3EventRecord::new("ObjectRemoved", "b", "k", 10)),
            TriggerRecord::Storage(S3EventRecord::new("ObjectRemoved:Delete", "b", "k", 10)),
            TriggerRecord::Storage(S3EventRecord::new("ObjectRestore:Completed", "b", "k", 10)),
        ]);

        assert_eq!(normalizer.object_references(&batch).count(), 0);
    }

    #[test]
    fn test_test_event_yields_nothing() {
        let normalizer = EventNormalizer::new();
        let batch = TriggerBatch::new(vec![TriggerRecord::Queue(QueueBody::TestEvent)]);

        assert_eq!(normalizer.object_references(&batch).count(), 0);
        assert_eq!(EventNormalizer::storage_event_count(&batch), 0);
    }

    #[test]
    fn test_flattens_queue_and_direct_records_in_order() {
        let normalizer = EventNormalizer::new();
        let batch = TriggerBatch::new(vec![
            TriggerRecord::Storage(created("a.json", 1)),
            TriggerRecord::Queue(QueueBody::Notifications(vec![
                created("b.json", 2),
                created("empty.json", 0),
                created("c.json", 3),
            ])),
            TriggerRecord::Queue(QueueBody::TestEvent),
            TriggerRecord::Storage(created("d.json", 4)),
        ]);

        let keys: Vec<_> = normalizer
            .object_references(&batch)
            .map(|reference| reference.key)
            .collect();
        assert_eq!(keys, vec!["a.json", "b.json", "c.json", "d.json"]);
        assert_eq!(EventNormalizer::storage_event_count(&batch), 5);
    }
}
