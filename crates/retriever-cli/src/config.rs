//! Configuration resolution for the CLI.

use crate::error::Result;
use retriever_pipeline::PipelineConfig;
use std::path::Path;
use tracing::debug;

/// Load the pipeline configuration once at process start.
///
/// Reads the TOML file when one is given, otherwise starts from defaults,
/// then applies `RETRIEVER_*` environment overrides.
pub fn resolve(path: Option<&Path>) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            PipelineConfig::from_file(path)?
        }
        None => PipelineConfig::default(),
    };

    config.apply_env_overrides()?;
    Ok(config)
}
