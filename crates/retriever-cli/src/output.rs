//! Output formatting for the CLI.

use crate::error::Result;
use retriever_pipeline::Response;

/// Render an invocation response as pretty JSON.
pub fn format_response(response: &Response) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

/// One-line summary of an install.
pub fn format_install(database: &str, created: bool) -> String {
    if created {
        format!("Created capture schema in {}", database)
    } else {
        format!("Capture schema already present in {}", database)
    }
}
