//! Trigger payload shapes.
//!
//! An invocation receives a batch of records. Each record is either a storage
//! notification delivered directly by S3, or a queue message whose body wraps
//! a batch of storage notifications.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Event source tag of a storage notification delivered directly by S3.
pub const S3_EVENT_SOURCE: &str = "aws:s3";

/// Event source tag of a record delivered through an SQS queue.
pub const SQS_EVENT_SOURCE: &str = "aws:sqs";

/// Value of the `Event` field S3 sends when it verifies a queue subscription.
pub const S3_TEST_EVENT: &str = "s3:TestEvent";

/// A single S3 event notification record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct S3EventRecord {
    #[serde(rename = "eventSource", default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,
    #[serde(rename = "eventName")]
    pub event_name: String,
    pub s3: S3Entity,
}

impl S3EventRecord {
    /// Create a record for the given bucket, key and size.
    pub fn new(
        event_name: impl Into<String>,
        bucket: impl Into<String>,
        key: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            event_source: Some(S3_EVENT_SOURCE.to_string()),
            event_name: event_name.into(),
            s3: S3Entity {
                bucket: S3Bucket { name: bucket.into() },
                object: S3Object {
                    key: key.into(),
                    size,
                },
            },
        }
    }

    /// Whether the event reports a newly created object (any `ObjectCreated:*` flavour).
    pub fn is_object_created(&self) -> bool {
        self.event_name.contains("ObjectCreated")
    }
}

/// The `s3` section of a notification record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct S3Object {
    /// Object key as sent by S3, URL-encoded.
    pub key: String,
    /// Object size in bytes. Absent for some event types, treated as zero.
    #[serde(default)]
    pub size: u64,
}

impl S3Object {
    /// The object key with S3's URL encoding removed (`+` is a space, `%XX` an escaped byte).
    pub fn decoded_key(&self) -> String {
        percent_decode_str(&self.key.replace('+', " "))
            .decode_utf8_lossy()
            .into_owned()
    }
}

/// Parsed body of a queue message.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueBody {
    /// S3 connectivity test sent when a bucket is first subscribed to the queue.
    TestEvent,
    /// A batch of storage notifications.
    Notifications(Vec<S3EventRecord>),
}

/// One record of the trigger batch, decoded from its `eventSource` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerRecord {
    /// Notification delivered directly by S3.
    Storage(S3EventRecord),
    /// Queue message wrapping S3 notifications.
    Queue(QueueBody),
}

/// The ordered records of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerBatch {
    pub records: Vec<TriggerRecord>,
}

impl TriggerBatch {
    pub fn new(records: Vec<TriggerRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_s3_record() {
        let json = r#"{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "bucket": { "name": "waf-logs", "arn": "arn:aws:s3:::waf-logs" },
                "object": { "key": "logs/a.json", "size": 120, "eTag": "abc" }
            }
        }"#;

        let record: S3EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.event_source.as_deref(), Some(S3_EVENT_SOURCE));
        assert_eq!(record.s3.bucket.name, "waf-logs");
        assert_eq!(record.s3.object.key, "logs/a.json");
        assert_eq!(record.s3.object.size, 120);
        assert!(record.is_object_created());
    }

    #[test]
    fn test_missing_size_defaults_to_zero() {
        let json = r#"{
            "eventName": "ObjectRemoved:Delete",
            "s3": { "bucket": { "name": "b" }, "object": { "key": "k" } }
        }"#;

        let record: S3EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.s3.object.size, 0);
        assert!(!record.is_object_created());
    }

    #[test]
    fn test_decoded_key() {
        let record = S3EventRecord::new(
            "ObjectCreated:Put",
            "b",
            "AWSLogs/2024/01/05/waf+log%3A01.gz",
            1,
        );
        assert_eq!(record.s3.object.decoded_key(), "AWSLogs/2024/01/05/waf log:01.gz");
    }

    #[test]
    fn test_decoded_key_plain() {
        let record = S3EventRecord::new("ObjectCreated:Put", "b", "logs/a.json", 1);
        assert_eq!(record.s3.object.decoded_key(), "logs/a.json");
    }

    #[test]
    fn test_decoded_key_keeps_query_characters() {
        for (raw, decoded) in [
            ("logs/a=", "logs/a="),
            ("logs/a&&b", "logs/a&&b"),
            ("&logs/x", "&logs/x"),
            ("logs/a%3Db", "logs/a=b"),
            ("logs/a%2Bb+c", "logs/a+b c"),
        ] {
            let record = S3EventRecord::new("ObjectCreated:Put", "b", raw, 1);
            assert_eq!(record.s3.object.decoded_key(), decoded, "key {}", raw);
        }
    }
}
