//! Retriever Gatekeeper
//!
//! Field-level validation for captured records.
//!
//! The Gatekeeper provides:
//! - Presence checks (non-blank values)
//! - Integer range checks (response codes, process ids)
//! - JSON and UUID format checks
//! - The API/URL cross-field check, with a literal fallback for a missing API
//!
//! Every check either returns normally or fails with a [`ValidationError`]
//! naming the field, what was expected, and what was found.
//!
//! # Examples
//!
//! ```
//! use retriever_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//!
//! assert!(gatekeeper.validate_code("200").is_ok());
//! let err = gatekeeper.validate_code("700").unwrap_err();
//! assert_eq!(err.field_name, "Response Code");
//! assert_eq!(err.expected, "must be a number from 100 to 599");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::{IntRange, ValidationConfig};
pub use error::ValidationError;
pub use validator::Gatekeeper;
