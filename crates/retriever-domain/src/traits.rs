//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::{ImportTicket, NewCapture, ObjectRef, PersistedRow};
use std::fmt;

/// Errors raised by an object store
///
/// Not-found and transient failures stay distinguishable so callers can
/// decide which one is the caller's fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectStoreError {
    /// No object under that bucket and key
    NotFound {
        /// Bucket searched
        bucket: String,
        /// Key searched
        key: String,
    },

    /// The store could not be reached or read
    Transient(String),
}

impl fmt::Display for ObjectStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectStoreError::NotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            ObjectStoreError::Transient(detail) => {
                write!(f, "Object store unavailable: {}", detail)
            }
        }
    }
}

impl std::error::Error for ObjectStoreError {}

/// Trait for reading objects out of a bucket
///
/// Implemented by the pipeline's storage adapters
pub trait ObjectStore {
    /// Fetch the full contents of an object
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}

/// Broad classes of storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Integrity or uniqueness constraint violated
    Conflict,

    /// Connection, locking or other operational failure
    Operational,

    /// Value rejected by the storage engine
    Data,
}

/// Storage errors that can say what kind of failure they are
pub trait StoreFailure: fmt::Display {
    /// Classify this failure
    fn kind(&self) -> FailureKind;

    /// True for integrity/uniqueness violations
    fn is_conflict(&self) -> bool {
        self.kind() == FailureKind::Conflict
    }
}

/// Trait for persisting captures
///
/// Implemented by the infrastructure layer (retriever-store)
pub trait CaptureStore {
    /// Error type for store operations
    type Error: StoreFailure;

    /// Insert one capture in its own transaction and return the generated identifiers
    ///
    /// A failed insert must leave nothing behind.
    fn insert_capture(&mut self, capture: &NewCapture) -> Result<PersistedRow, Self::Error>;

    /// Look up the identifiers of the capture with the given uuid
    fn find_by_uuid(&self, uuid: &str) -> Result<Option<PersistedRow>, Self::Error>;
}

/// Trait for the direct large-object import path
///
/// Implemented by the infrastructure layer (retriever-store)
pub trait LargeObjectImporter {
    /// Error type for import operations
    type Error: fmt::Display;

    /// Hand an object to the storage layer for direct import
    fn import_object(&mut self, object: &ObjectRef) -> Result<ImportTicket, Self::Error>;
}
