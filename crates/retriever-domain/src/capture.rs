//! Rows on their way into, and back out of, the capture table

use chrono::NaiveDateTime;

/// A validated capture, typed for insertion
///
/// Built by the persistence coordinator only after every field check has
/// passed, so the integers and timestamps here are already known good.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCapture {
    /// Request start (UTC)
    pub start_time: NaiveDateTime,

    /// Response arrival (UTC)
    pub response_time: NaiveDateTime,

    /// HTTP response code
    pub response_code: i32,

    /// Requested URL
    pub url: String,

    /// Resolved API name (possibly the fallback literal)
    pub api: String,

    /// Capturing script name
    pub script_name: String,

    /// Capturing script process id
    pub script_pid: i32,

    /// Request parameters, JSON text
    pub parameters: String,

    /// Captured body, JSON text
    pub json_content: String,

    /// Source object uuid; unique in storage
    pub uuid: String,
}

/// Identifier pair generated by storage for a persisted capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersistedRow {
    /// Generated primary key
    pub json_data_id: i64,

    /// Storage-assigned shard; opaque to the pipeline
    pub partition_number: i64,
}

/// Receipt for an object handed to the large-object import path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTicket {
    /// Identifier of the import request
    pub import_id: i64,

    /// Source bucket
    pub bucket: String,

    /// Source object key
    pub key: String,
}
