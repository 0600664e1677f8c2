//! Core pipeline logic

use crate::error::PipelineError;
use crate::event::TriggerEvent;
use crate::response::Response;
use retriever_domain::traits::{CaptureStore, LargeObjectImporter, ObjectStore};
use retriever_domain::ImportTicket;
use retriever_extractor::{extract, ExtractorError};
use retriever_loader::{Loader, PersistOutcome};
use tracing::{debug, error, info, warn};

/// How an invocation finished successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The object was extracted, validated and stored
    Persisted(PersistOutcome),

    /// The object was handed to the direct import path
    Imported(ImportTicket),
}

/// Handles trigger events one at a time
pub struct Pipeline<O, S>
where
    O: ObjectStore,
    S: CaptureStore + LargeObjectImporter,
{
    objects: O,
    loader: Loader<S>,
    large_object_threshold: u64,
}

impl<O, S> Pipeline<O, S>
where
    O: ObjectStore,
    S: CaptureStore + LargeObjectImporter,
{
    /// Create a new Pipeline
    pub fn new(objects: O, loader: Loader<S>, large_object_threshold: u64) -> Self {
        Self {
            objects,
            loader,
            large_object_threshold,
        }
    }

    /// The object store events are read from
    pub fn objects(&self) -> &O {
        &self.objects
    }

    /// The persistence coordinator
    pub fn loader(&self) -> &Loader<S> {
        &self.loader
    }

    /// Parse a raw trigger event, run it, and shape the response
    pub fn handle(&mut self, event_json: &str) -> Response {
        let result = TriggerEvent::from_json(event_json).and_then(|event| self.run(&event));

        match result {
            Ok(outcome) => Response::from(&outcome),
            Err(e) => {
                error!("Invocation failed: {}", e);
                Response::from(&e)
            }
        }
    }

    /// Run one event through the pipeline
    pub fn run(&mut self, event: &TriggerEvent) -> Result<PipelineOutcome, PipelineError> {
        let object = &event.object;
        info!("Processing {} ({} bytes)", object, object.size);

        if object.size > self.large_object_threshold {
            info!(
                "{} exceeds {} bytes; routing to direct import",
                object, self.large_object_threshold
            );
            let ticket = self
                .loader
                .store_mut()
                .import_object(object)
                .map_err(|e| PipelineError::Storage(e.to_string()))?;
            info!("Queued {} as import {}", object, ticket.import_id);
            return Ok(PipelineOutcome::Imported(ticket));
        }

        let bytes = self.objects.fetch(&object.bucket, &object.key)?;
        debug!("Fetched {} bytes from {}", bytes.len(), object);

        let raw = String::from_utf8(bytes).map_err(ExtractorError::from)?;
        let record = extract(&raw, object).map_err(|e| {
            warn!("Could not extract {}: {}", object, e);
            e
        })?;

        let outcome = self.loader.persist(&record)?;
        info!(
            "Finished {}: record {} in partition {}",
            object, outcome.row.json_data_id, outcome.row.partition_number
        );
        Ok(PipelineOutcome::Persisted(outcome))
    }
}
