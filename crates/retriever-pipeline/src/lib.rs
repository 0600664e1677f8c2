//! Retriever Pipeline
//!
//! Runs one trigger event through extraction, validation and persistence.
//!
//! # Architecture
//!
//! ```text
//! TriggerEvent → ObjectStore::fetch → extract → Loader::persist → Response
//!             ↘ (oversize) LargeObjectImporter::import_object ↗
//! ```
//!
//! One event names exactly one object. Objects larger than the configured
//! threshold are never fetched; they are handed to the storage layer's
//! direct import path instead.
//!
//! # Example Usage
//!
//! ```no_run
//! use retriever_gatekeeper::Gatekeeper;
//! use retriever_loader::Loader;
//! use retriever_pipeline::{FsObjectStore, Pipeline, PipelineConfig};
//! use retriever_store::SqliteStore;
//!
//! let config = PipelineConfig::default();
//! let store = SqliteStore::new(&config.database.path).unwrap();
//! let loader = Loader::new(store, Gatekeeper::new(config.validation.clone()));
//! let objects = FsObjectStore::new(&config.objects.root);
//!
//! let threshold = config.pipeline.large_object_threshold_bytes;
//! let mut pipeline = Pipeline::new(objects, loader, threshold);
//!
//! let event = r#"{"Record": {"s3": {
//!     "bucket": {"name": "b"},
//!     "object": {"key": "k.json", "size": 10}
//! }}}"#;
//! let response = pipeline.handle(event);
//! println!("{}", response.status_code);
//! ```

#![warn(missing_docs)]

pub mod config;
mod error;
mod event;
mod object_store;
mod pipeline;
mod response;

pub use config::{ConfigError, DatabaseConfig, ObjectsConfig, PipelineConfig, RoutingConfig};
pub use error::PipelineError;
pub use event::TriggerEvent;
pub use object_store::{FsObjectStore, MemoryObjectStore};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use response::Response;
