//! Configuration file parsing for the pipeline
//!
//! Settings come from a TOML file, then environment overrides, and are
//! resolved once at process start.

use retriever_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding `database.path`
pub const ENV_DB_PATH: &str = "RETRIEVER_DB_PATH";
/// Environment variable overriding `database.connect_timeout_secs`
pub const ENV_DB_CONNECT_TIMEOUT: &str = "RETRIEVER_DB_CONNECT_TIMEOUT";
/// Environment variable overriding `objects.root`
pub const ENV_OBJECT_ROOT: &str = "RETRIEVER_OBJECT_ROOT";
/// Environment variable overriding `pipeline.large_object_threshold_bytes`
pub const ENV_LARGE_OBJECT_THRESHOLD: &str = "RETRIEVER_LARGE_OBJECT_THRESHOLD";

/// Pipeline configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Setting present but unusable
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending setting
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Pipeline configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Capture database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Object store settings
    #[serde(default)]
    pub objects: ObjectsConfig,

    /// Routing settings
    #[serde(default)]
    pub pipeline: RoutingConfig,

    /// Field validation rules
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Capture database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// How long to wait on a locked database
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Object store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectsConfig {
    /// Directory holding one subdirectory per bucket
    #[serde(default = "default_object_root")]
    pub root: PathBuf,
}

/// Routing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Objects above this size skip the in-memory path
    #[serde(default = "default_large_object_threshold")]
    pub large_object_threshold_bytes: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("retriever.db")
}

/// Default connect timeout: 5 seconds
fn default_connect_timeout() -> u64 {
    5
}

fn default_object_root() -> PathBuf {
    PathBuf::from("objects")
}

/// Default threshold: 40 MiB
fn default_large_object_threshold() -> u64 {
    40 * 1024 * 1024
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            root: default_object_root(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            large_object_threshold_bytes: default_large_object_threshold(),
        }
    }
}

impl DatabaseConfig {
    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_DB_CONNECT_TIMEOUT) {
            self.database.connect_timeout_secs = parse_u64(ENV_DB_CONNECT_TIMEOUT, &raw)?;
        }
        if let Some(root) = lookup(ENV_OBJECT_ROOT) {
            self.objects.root = PathBuf::from(root);
        }
        if let Some(raw) = lookup(ENV_LARGE_OBJECT_THRESHOLD) {
            self.pipeline.large_object_threshold_bytes =
                parse_u64(ENV_LARGE_OBJECT_THRESHOLD, &raw)?;
        }
        self.validate()
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("database.path", "must not be empty"));
        }
        if self.database.connect_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "database.connect_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.objects.root.as_os_str().is_empty() {
            return Err(ConfigError::invalid("objects.root", "must not be empty"));
        }
        if self.pipeline.large_object_threshold_bytes == 0 {
            return Err(ConfigError::invalid(
                "pipeline.large_object_threshold_bytes",
                "must be greater than zero",
            ));
        }
        self.validation
            .validate()
            .map_err(|reason| ConfigError::invalid("validation", reason))
    }
}

fn parse_u64(field: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, format!("'{}' is not a whole number", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.database.path, PathBuf::from("retriever.db"));
        assert_eq!(config.database.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.pipeline.large_object_threshold_bytes, 41_943_040);
        assert_eq!(config.validation.api_fallback, "API");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [database]
            path = "/var/lib/retriever/capture.db"
            connect_timeout_secs = 10

            [objects]
            root = "/srv/buckets"

            [pipeline]
            large_object_threshold_bytes = 1048576

            [validation]
            api_fallback = "UNKNOWN"
            response_code = { low = 200, high = 300 }
        "#;

        let config = PipelineConfig::from_toml(toml).unwrap();
        assert_eq!(config.database.path, PathBuf::from("/var/lib/retriever/capture.db"));
        assert_eq!(config.database.connect_timeout_secs, 10);
        assert_eq!(config.objects.root, PathBuf::from("/srv/buckets"));
        assert_eq!(config.pipeline.large_object_threshold_bytes, 1_048_576);
        assert_eq!(config.validation.api_fallback, "UNKNOWN");
        assert_eq!(config.validation.response_code.low, 200);
        assert_eq!(config.validation.script_pid.high, 50000);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = PipelineConfig::from_toml("[database]\nconnect_timeout_secs = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let result = PipelineConfig::from_toml("[pipeline]\nlarge_object_threshold_bytes = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_rejects_bad_toml() {
        let result = PipelineConfig::from_toml("[database\npath = 1");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_DB_PATH, ":memory:"),
            (ENV_DB_CONNECT_TIMEOUT, "30"),
            (ENV_OBJECT_ROOT, "/tmp/objects"),
            (ENV_LARGE_OBJECT_THRESHOLD, " 2048 "),
        ]
        .into_iter()
        .collect();

        let mut config = PipelineConfig::default();
        config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database.path, PathBuf::from(":memory:"));
        assert_eq!(config.database.connect_timeout_secs, 30);
        assert_eq!(config.objects.root, PathBuf::from("/tmp/objects"));
        assert_eq!(config.pipeline.large_object_threshold_bytes, 2048);
    }

    #[test]
    fn test_override_must_be_numeric() {
        let mut config = PipelineConfig::default();
        let result = config.apply_overrides(|name| {
            (name == ENV_DB_CONNECT_TIMEOUT).then(|| "soon".to_string())
        });

        match result {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, ENV_DB_CONNECT_TIMEOUT),
            other => panic!("Expected invalid config, got {:?}", other),
        }
    }
}
