//! Gatekeeper error types

use thiserror::Error;

/// A single failed field check
///
/// This is data, not a side channel: all four attributes are meant to reach
/// the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}. {field_name} should be '{expected}' but was '{actual}'")]
pub struct ValidationError {
    /// Short description of the failed rule
    pub message: String,

    /// Human-readable field name
    pub field_name: String,

    /// What the field should have held
    pub expected: String,

    /// What the field actually held
    pub actual: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(
        message: impl Into<String>,
        field_name: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            field_name: field_name.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
