//! Loader error types

use retriever_gatekeeper::ValidationError;
use thiserror::Error;

/// Errors that can occur while persisting a record
#[derive(Error, Debug)]
pub enum LoadError {
    /// A field check failed; nothing was written
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage failed and could not be resolved by looking up the uuid
    #[error("Storage error: {0}")]
    Storage(String),
}
