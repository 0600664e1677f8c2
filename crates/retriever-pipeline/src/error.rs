//! Pipeline error types

use retriever_domain::traits::ObjectStoreError;
use retriever_extractor::ExtractorError;
use retriever_gatekeeper::ValidationError;
use retriever_loader::LoadError;
use thiserror::Error;

/// Errors that can end an invocation
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The event or the object it names cannot be processed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A field check failed; nothing was written
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Storage or object retrieval failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PipelineError {
    /// Status code reported to the invoker
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::MalformedInput(_) | PipelineError::Validation(_) => 400,
            PipelineError::Storage(_) => 500,
        }
    }
}

impl From<ExtractorError> for PipelineError {
    fn from(e: ExtractorError) -> Self {
        PipelineError::MalformedInput(e.to_string())
    }
}

impl From<LoadError> for PipelineError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Validation(err) => PipelineError::Validation(err),
            LoadError::Storage(detail) => PipelineError::Storage(detail),
        }
    }
}

impl From<ObjectStoreError> for PipelineError {
    fn from(e: ObjectStoreError) -> Self {
        match e {
            ObjectStoreError::NotFound { .. } => PipelineError::MalformedInput(e.to_string()),
            ObjectStoreError::Transient(_) => PipelineError::Storage(e.to_string()),
        }
    }
}
