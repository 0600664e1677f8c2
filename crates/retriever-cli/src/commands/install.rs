//! Install command implementation.

use crate::error::Result;
use crate::output;
use retriever_pipeline::PipelineConfig;
use retriever_store::SqliteStore;
use tracing::info;

/// Execute the install command.
///
/// Returns whether the schema was created by this call.
pub fn execute_install(config: &PipelineConfig) -> Result<bool> {
    let database = &config.database;
    let store = SqliteStore::with_timeout(&database.path, database.connect_timeout())?;
    let created = store.created_schema();

    let path = database.path.display().to_string();
    info!("{}", output::format_install(&path, created));
    println!("{}", output::format_install(&path, created));

    Ok(created)
}
