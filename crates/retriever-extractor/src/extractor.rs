//! Core extraction logic

use crate::attributes::{ATTRIBUTES, DATA_TYPE, STRING_VALUE};
use crate::error::ExtractorError;
use retriever_domain::{CapturedRecord, MetadataValue, ObjectRef};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

const CONTENT: &str = "content";
const METADATA: &str = "metadata";
const JSON_SUFFIX: &str = ".json";
const UUID_LEN: usize = 36;

/// Extract a captured record from a raw JSON document
///
/// `source` names the object the document was read from; its key supplies
/// the record uuid.
pub fn extract(raw_json: &str, source: &ObjectRef) -> Result<CapturedRecord, ExtractorError> {
    debug!("Extracting record from {}", source);

    let document: Value = serde_json::from_str(raw_json)?;

    let content = match document.get(CONTENT) {
        None => return Err(ExtractorError::MissingKey(CONTENT)),
        Some(Value::String(content)) => content.clone(),
        Some(_) => {
            return Err(ExtractorError::WrongShape {
                key: CONTENT,
                expected: "a string",
            })
        }
    };

    let metadata = match document.get(METADATA) {
        None => return Err(ExtractorError::MissingKey(METADATA)),
        Some(Value::Object(entries)) => read_metadata(entries),
        // Any other shape simply yields no attributes
        Some(_) => BTreeMap::new(),
    };

    let mut record = CapturedRecord {
        bucket: source.bucket.clone(),
        object_key: source.key.clone(),
        uuid: uuid_from_key(&source.key),
        content,
        metadata,
        ..CapturedRecord::default()
    };

    for attribute in ATTRIBUTES {
        let value = record
            .metadata
            .get(attribute.metadata_name())
            .and_then(|envelope| envelope.string_value.clone())
            .unwrap_or_default();
        *attribute.field_mut(&mut record) = value;
    }

    debug!(
        "Extracted uuid '{}' with {} metadata attributes",
        record.uuid,
        record.metadata.len()
    );

    Ok(record)
}

/// Derive the capture uuid from an object key
///
/// Strips a trailing `.json` and keeps the last 36 characters. No format
/// check is made here.
pub fn uuid_from_key(key: &str) -> String {
    let stem = key.strip_suffix(JSON_SUFFIX).unwrap_or(key);
    let skip = stem.chars().count().saturating_sub(UUID_LEN);
    stem.chars().skip(skip).collect()
}

fn read_metadata(entries: &Map<String, Value>) -> BTreeMap<String, MetadataValue> {
    entries
        .iter()
        .map(|(name, envelope)| {
            let member = |key: &str| {
                envelope
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            let value = MetadataValue {
                string_value: member(STRING_VALUE),
                data_type: member(DATA_TYPE),
            };
            (name.clone(), value)
        })
        .collect()
}
