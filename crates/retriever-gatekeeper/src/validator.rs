//! Field validation logic

use crate::{ValidationConfig, ValidationError};
use uuid::{Uuid, Version};

/// Length of a hyphenated UUID string
const HYPHENATED_UUID_LEN: usize = 36;

/// The Gatekeeper validates captured fields before storage
///
/// Checks are pure and independent; callers stop at the first failure.
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Ensure a value contains non-whitespace text
    pub fn validate_contains(&self, field_name: &str, actual: &str) -> Result<(), ValidationError> {
        if actual.trim().is_empty() {
            return Err(ValidationError::new(
                "Variable value required",
                field_name,
                "Not Blank",
                actual,
            ));
        }
        Ok(())
    }

    /// Ensure a value holds a timestamp
    ///
    /// Only presence is checked here; the numeric conversion happens when the
    /// insert row is built.
    pub fn validate_time(&self, field_name: &str, actual: &str) -> Result<(), ValidationError> {
        self.validate_contains(field_name, actual)
    }

    /// Ensure a value is an integer in `[low, high)`
    pub fn validate_int(
        &self,
        field_name: &str,
        actual: &str,
        low: i64,
        high: i64,
    ) -> Result<(), ValidationError> {
        self.validate_contains(field_name, actual)?;

        match actual.trim().parse::<i64>() {
            Ok(n) if low <= n && n < high => Ok(()),
            _ => Err(ValidationError::new(
                "Integer value required",
                field_name,
                format!("must be a number from {} to {}", low, high),
                actual,
            )),
        }
    }

    /// Ensure a value looks like an HTTP response code
    pub fn validate_code(&self, actual: &str) -> Result<(), ValidationError> {
        let range = self.config.response_code;
        self.validate_int("Response Code", actual, range.low, range.high)
    }

    /// Ensure a value looks like a process id
    pub fn validate_pid(&self, actual: &str) -> Result<(), ValidationError> {
        let range = self.config.script_pid;
        self.validate_int("PIDs", actual, range.low, range.high)
    }

    /// Ensure a URL is present
    ///
    /// No pattern check is applied.
    pub fn validate_url(&self, actual: &str) -> Result<(), ValidationError> {
        self.validate_contains("URL", actual)
    }

    /// Resolve the API name against the URL
    ///
    /// A blank API resolves to the configured fallback literal. Otherwise the
    /// API must appear somewhere in the URL, and is returned unchanged.
    pub fn validate_api(&self, actual: &str, url: &str) -> Result<String, ValidationError> {
        if self.validate_contains("API Call", actual).is_err() {
            return Ok(self.config.api_fallback.clone());
        }

        if !url.contains(actual) {
            return Err(ValidationError::new(
                "API-URL mismatch",
                "API",
                "must match that in the URL",
                actual,
            ));
        }

        Ok(actual.to_string())
    }

    /// Ensure a value is a parseable JSON document
    pub fn validate_json(&self, field_name: &str, actual: &str) -> Result<(), ValidationError> {
        self.validate_contains(field_name, actual)?;

        serde_json::from_str::<serde_json::Value>(actual)
            .map(|_| ())
            .map_err(|_| {
                ValidationError::new("Must be JSON", field_name, "expected valid JSON", actual)
            })
    }

    /// Ensure a value is a hyphenated version 4 UUID
    pub fn validate_uuid(&self, field_name: &str, actual: &str) -> Result<(), ValidationError> {
        self.validate_contains(field_name, actual)?;

        let is_v4 = actual.len() == HYPHENATED_UUID_LEN
            && Uuid::try_parse(actual)
                .map(|u| u.get_version() == Some(Version::Random))
                .unwrap_or(false);

        if !is_v4 {
            return Err(ValidationError::new(
                "UUID value required",
                field_name,
                "UUID version 4",
                actual,
            ));
        }
        Ok(())
    }
}
