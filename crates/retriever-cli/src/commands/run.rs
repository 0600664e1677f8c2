//! Run command implementation.

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::output;
use retriever_gatekeeper::Gatekeeper;
use retriever_loader::Loader;
use retriever_pipeline::{FsObjectStore, Pipeline, PipelineConfig, Response};
use retriever_store::SqliteStore;
use std::fs;
use std::io::{self, Read};

/// Execute the run command.
///
/// Prints the response and returns it so the caller can pick an exit code.
pub fn execute_run(args: RunArgs, config: &PipelineConfig) -> Result<Response> {
    let event_json = read_event(&args.event)?;

    let database = &config.database;
    let store = SqliteStore::with_timeout(&database.path, database.connect_timeout())?;
    let loader = Loader::new(store, Gatekeeper::new(config.validation.clone()));
    let objects = FsObjectStore::new(&config.objects.root);

    let threshold = config.pipeline.large_object_threshold_bytes;
    let mut pipeline = Pipeline::new(objects, loader, threshold);
    let response = pipeline.handle(&event_json);

    println!("{}", output::format_response(&response)?);
    Ok(response)
}

/// Read the trigger event from a file, or stdin for `-`.
fn read_event(source: &str) -> Result<String> {
    let event_json = if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source)?
    };

    if event_json.trim().is_empty() {
        return Err(CliError::InvalidInput("Trigger event is empty".to_string()));
    }
    Ok(event_json)
}
