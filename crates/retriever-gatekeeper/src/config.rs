//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Closed-open integer range `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// Smallest accepted value
    pub low: i64,

    /// First rejected value above the range
    pub high: i64,
}

impl IntRange {
    /// Create a new range
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Whether `n` falls inside the range
    pub fn contains(&self, n: i64) -> bool {
        self.low <= n && n < self.high
    }
}

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Accepted HTTP response codes
    #[serde(default = "default_response_code")]
    pub response_code: IntRange,

    /// Accepted script process ids
    #[serde(default = "default_script_pid")]
    pub script_pid: IntRange,

    /// Value stored when the API attribute is blank
    #[serde(default = "default_api_fallback")]
    pub api_fallback: String,
}

fn default_response_code() -> IntRange {
    IntRange::new(100, 599)
}

fn default_script_pid() -> IntRange {
    IntRange::new(2, 50000)
}

fn default_api_fallback() -> String {
    "API".to_string()
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            response_code: default_response_code(),
            script_pid: default_script_pid(),
            api_fallback: default_api_fallback(),
        }
    }
}

impl ValidationConfig {
    /// Validate the configuration itself
    pub fn validate(&self) -> Result<(), String> {
        if self.response_code.low >= self.response_code.high {
            return Err("response_code range is empty".to_string());
        }
        if self.script_pid.low >= self.script_pid.high {
            return Err("script_pid range is empty".to_string());
        }
        if self.api_fallback.trim().is_empty() {
            return Err("api_fallback must not be blank".to_string());
        }
        Ok(())
    }
}
