//! Trigger event parsing
//!
//! Accepts the object-storage notification shape, either as a single
//! `Record` or as a `Records` array holding exactly one entry.

use crate::error::PipelineError;
use retriever_domain::ObjectRef;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "Record")]
    record: Option<NotificationRecord>,

    #[serde(rename = "Records")]
    records: Option<Vec<NotificationRecord>>,
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: BucketEntity,
    object: ObjectEntity,
}

#[derive(Debug, Deserialize)]
struct BucketEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectEntity {
    key: String,
    #[serde(default)]
    size: u64,
}

/// The one object an invocation works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Object named by the notification
    pub object: ObjectRef,
}

impl TriggerEvent {
    /// Build an event directly from an object reference
    pub fn new(object: ObjectRef) -> Self {
        Self { object }
    }

    /// Parse a notification document
    pub fn from_json(raw: &str) -> Result<Self, PipelineError> {
        let notification: Notification = serde_json::from_str(raw).map_err(|e| {
            PipelineError::MalformedInput(format!("Unreadable trigger event: {}", e))
        })?;

        let mut records = match (notification.record, notification.records) {
            (Some(record), None) => vec![record],
            (None, Some(records)) => records,
            (Some(_), Some(_)) => {
                return Err(PipelineError::MalformedInput(
                    "Trigger event carries both Record and Records".to_string(),
                ))
            }
            (None, None) => {
                return Err(PipelineError::MalformedInput(
                    "Trigger event carries no record".to_string(),
                ))
            }
        };

        if records.len() != 1 {
            return Err(PipelineError::MalformedInput(format!(
                "Expected exactly one record per event, got {}",
                records.len()
            )));
        }

        let s3 = records.remove(0).s3;
        if s3.bucket.name.is_empty() || s3.object.key.is_empty() {
            return Err(PipelineError::MalformedInput(
                "Trigger event names an empty bucket or key".to_string(),
            ));
        }

        Ok(Self::new(ObjectRef::new(s3.bucket.name, s3.object.key, s3.object.size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"{
        "Record": {
            "s3": {
                "bucket": {"name": "some-s3-name"},
                "object": {
                    "key": "body_getTSData_24640_mod_444abb55-afe0-40f7-9791-c824ac396a75.json",
                    "size": 1024
                }
            }
        }
    }"#;

    #[test]
    fn test_single_record() {
        let event = TriggerEvent::from_json(SINGLE).unwrap();
        assert_eq!(event.object.bucket, "some-s3-name");
        assert_eq!(event.object.size, 1024);
        assert!(event.object.key.ends_with(".json"));
    }

    #[test]
    fn test_records_array_of_one() {
        let raw = r#"{"Records": [
            {"s3": {"bucket": {"name": "b"}, "object": {"key": "k.json"}}}
        ]}"#;
        let event = TriggerEvent::from_json(raw).unwrap();
        assert_eq!(event.object, ObjectRef::new("b", "k.json", 0));
    }

    #[test]
    fn test_rejects_multiple_records() {
        let raw = r#"{"Records": [
            {"s3": {"bucket": {"name": "b"}, "object": {"key": "one.json"}}},
            {"s3": {"bucket": {"name": "b"}, "object": {"key": "two.json"}}}
        ]}"#;
        assert!(matches!(
            TriggerEvent::from_json(raw),
            Err(PipelineError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_rejects_empty_records() {
        assert!(TriggerEvent::from_json(r#"{"Records": []}"#).is_err());
        assert!(TriggerEvent::from_json("{}").is_err());
    }

    #[test]
    fn test_rejects_missing_bucket() {
        let raw = r#"{"Record": {"s3": {"object": {"key": "k.json"}}}}"#;
        assert!(TriggerEvent::from_json(raw).is_err());
    }

    #[test]
    fn test_rejects_non_json() {
        match TriggerEvent::from_json("not an event") {
            Err(PipelineError::MalformedInput(detail)) => {
                assert!(detail.starts_with("Unreadable trigger event"))
            }
            other => panic!("Expected malformed input, got {:?}", other),
        }
    }
}
