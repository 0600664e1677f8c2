//! Records extracted from a bucket object

use std::collections::BTreeMap;
use std::fmt;

/// An object in a bucket, as named by a trigger event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Bucket name
    pub bucket: String,

    /// Object key within the bucket
    pub key: String,

    /// Object size in bytes, as reported by the notification
    pub size: u64,
}

impl ObjectRef {
    /// Create a new object reference
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, size: u64) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            size,
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Typed-value envelope used by the upstream messaging system
///
/// Only the `StringValue` variant is read by the pipeline; other shapes are
/// carried as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataValue {
    /// The `StringValue` member, when present and a string
    pub string_value: Option<String>,

    /// The `DataType` member, when present and a string
    pub data_type: Option<String>,
}

impl MetadataValue {
    /// Envelope holding a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            data_type: Some("String".to_string()),
        }
    }
}

/// The flat record extracted from one captured object
///
/// Every metadata-derived field defaults to the empty string when the
/// attribute is absent; correctness is enforced later by validation.
/// A record lives for exactly one pipeline invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Source bucket
    pub bucket: String,

    /// Source object key
    pub object_key: String,

    /// Trailing 36 characters of the key, `.json` suffix removed (not yet validated)
    pub uuid: String,

    /// Raw payload, persisted verbatim
    pub content: String,

    /// Every metadata attribute found in the document
    pub metadata: BTreeMap<String, MetadataValue>,

    /// Requested URL (`URL`)
    pub url: String,

    /// API call name (`API`)
    pub api: String,

    /// Request parameters as JSON text (`Parameters`)
    pub parameters: String,

    /// Request start, epoch seconds (`StartTime`)
    pub start_time: String,

    /// Capturing script process id (`PID`)
    pub script_pid: String,

    /// Capturing script name (`ScriptName`)
    pub script_name: String,

    /// Response arrival, epoch seconds (`ResponseTime`)
    pub response_time: String,

    /// HTTP response code (`ResponseCode`)
    pub response_code: String,
}
