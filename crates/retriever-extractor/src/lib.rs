//! Retriever Extractor
//!
//! Turns a captured JSON document into a flat [`CapturedRecord`].
//!
//! # Overview
//!
//! Captured objects carry a `content` string and a `metadata` map of
//! typed-value envelopes (`{"StringValue": ...}`). The extractor copies the
//! content, reads eight named attributes out of the metadata, and derives the
//! capture uuid from the object key.
//!
//! # Architecture
//!
//! ```text
//! bytes → Extractor → CapturedRecord → Gatekeeper → CaptureStore
//! ```
//!
//! Extraction only fails when the document is not JSON or lacks `content` or
//! `metadata`. A missing or malformed attribute becomes an empty string, and
//! is left for the Gatekeeper to reject.
//!
//! # Example Usage
//!
//! ```
//! use retriever_domain::ObjectRef;
//! use retriever_extractor::extract;
//!
//! let source = ObjectRef::new(
//!     "capture-bucket",
//!     "body_getTSData_24640_mod_444abb55-afe0-40f7-9791-c824ac396a75.json",
//!     128,
//! );
//! let raw = r#"{"content": "{}", "metadata": {"URL": {"StringValue": "https://x/api/call"}}}"#;
//!
//! let record = extract(raw, &source).unwrap();
//! assert_eq!(record.uuid, "444abb55-afe0-40f7-9791-c824ac396a75");
//! assert_eq!(record.url, "https://x/api/call");
//! assert_eq!(record.api, "");
//! ```
//!
//! [`CapturedRecord`]: retriever_domain::CapturedRecord

#![warn(missing_docs)]

mod attributes;
mod error;
mod extractor;


pub use attributes::{Attribute, ATTRIBUTES, STRING_VALUE};
pub use error::ExtractorError;
pub use extractor::{extract, uuid_from_key};
