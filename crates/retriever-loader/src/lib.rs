//! Retriever Loader
//!
//! The persistence coordinator: validates a captured record with the
//! Gatekeeper and writes it to a `CaptureStore` as a single row.
//!
//! # Lifecycle of one `persist` call
//!
//! ```text
//! Idle → Validating → ValidationFailed
//!                   → Validated → Inserting → Inserted
//!                                           → ConflictRetried
//!                                           → StorageFailed
//! ```
//!
//! A uniqueness conflict on `uuid` means the same object was delivered
//! before; the coordinator answers with the identifiers of the existing row
//! rather than failing, so repeat deliveries are idempotent.
//!
//! # Examples
//!
//! ```no_run
//! use retriever_gatekeeper::Gatekeeper;
//! use retriever_loader::Loader;
//! use retriever_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! let mut loader = Loader::new(store, Gatekeeper::default());
//! // let outcome = loader.persist(&record)?;
//! ```

#![warn(missing_docs)]

mod error;
mod loader;

pub use error::LoadError;
pub use loader::{Loader, PersistOutcome, PersistPath};
