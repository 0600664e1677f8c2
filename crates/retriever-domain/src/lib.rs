//! Retriever Domain Layer
//!
//! This crate contains the data model shared by every stage of the capture
//! pipeline, together with the trait interfaces that the infrastructure
//! crates implement. It depends on nothing but `chrono`.
//!
//! ## Key Concepts
//!
//! - **ObjectRef**: the single bucket object named by a trigger event
//! - **CapturedRecord**: the flat record extracted from that object, not yet validated
//! - **NewCapture**: the typed row handed to storage once validation has passed
//! - **PersistedRow**: the generated identifier and partition number returned by storage
//!
//! ## Architecture
//!
//! ```text
//! bytes → CapturedRecord → (validated) NewCapture → PersistedRow
//! ```
//!
//! Object storage and the relational store sit behind the traits in
//! [`traits`]; nothing in this crate performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capture;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use capture::{ImportTicket, NewCapture, PersistedRow};
pub use record::{CapturedRecord, MetadataValue, ObjectRef};
pub use traits::{
    CaptureStore, FailureKind, LargeObjectImporter, ObjectStore, ObjectStoreError, StoreFailure,
};
