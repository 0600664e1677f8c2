//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Object bytes are not UTF-8 text
    #[error("Malformed input: object is not UTF-8 text: {0}")]
    NotText(#[from] std::string::FromUtf8Error),

    /// Object body is not a JSON document
    #[error("Malformed input: JSON parse error: {0}")]
    JsonParse(String),

    /// A required top-level key is absent
    #[error("Malformed input: missing required key '{0}'")]
    MissingKey(&'static str),

    /// A required top-level key has the wrong shape
    #[error("Malformed input: '{key}' must be {expected}")]
    WrongShape {
        /// Offending key
        key: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
