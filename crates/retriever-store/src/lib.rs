//! Retriever Storage Layer
//!
//! Implements the `CaptureStore` and `LargeObjectImporter` traits on SQLite.
//!
//! # Architecture
//!
//! - One `json_data` row per captured object, unique on `uuid`
//! - `partition_number` is a generated column; callers only ever read it back
//! - Objects too large for the in-memory path are queued in `large_object_import`
//!
//! # Examples
//!
//! ```no_run
//! use retriever_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for capture operations
//! ```

#![warn(missing_docs)]

use chrono::{NaiveDateTime, Utc};
use retriever_domain::traits::{CaptureStore, FailureKind, LargeObjectImporter, StoreFailure};
use retriever_domain::{ImportTicket, NewCapture, ObjectRef, PersistedRow};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const INSERT_CAPTURE: &str = "INSERT INTO json_data
     (start_time, response_time, response_code, url, api,
      script_name, script_pid, parameters, json_content, uuid)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
     RETURNING json_data_id, partition_number";

const SELECT_BY_UUID: &str =
    "SELECT json_data_id, partition_number FROM json_data WHERE uuid = ?1";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreFailure for StoreError {
    fn kind(&self) -> FailureKind {
        match self {
            StoreError::Database(rusqlite::Error::SqliteFailure(e, _)) => match e.code {
                ErrorCode::ConstraintViolation => FailureKind::Conflict,
                ErrorCode::TypeMismatch | ErrorCode::TooBig => FailureKind::Data,
                _ => FailureKind::Operational,
            },
            StoreError::Database(
                rusqlite::Error::ToSqlConversionFailure(_)
                | rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::IntegralValueOutOfRange(..)
                | rusqlite::Error::InvalidColumnType(..),
            ) => FailureKind::Data,
            StoreError::Database(_) => FailureKind::Operational,
            StoreError::InvalidData(_) => FailureKind::Data,
        }
    }
}

/// A capture row as stored
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCapture {
    /// Generated primary key
    pub json_data_id: i64,
    /// Generated shard number
    pub partition_number: i64,
    /// The inserted values
    pub capture: NewCapture,
}

/// SQLite-based implementation of CaptureStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each invocation should own its
/// own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
    created_schema: bool,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::with_timeout(path, Duration::from_secs(5))
    }

    /// Open a store, waiting at most `timeout` for a locked database
    pub fn with_timeout<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self, StoreError> {
        debug!("Connecting to database at {}", path.as_ref().display());
        let conn = Connection::open(path)?;
        conn.busy_timeout(timeout)?;

        let mut store = Self {
            conn,
            created_schema: false,
        };
        store.created_schema = store.initialize_schema()?;
        Ok(store)
    }

    /// Whether opening this store created the schema
    pub fn created_schema(&self) -> bool {
        self.created_schema
    }

    /// Initialize the database schema, returning true if it was not there before
    fn initialize_schema(&mut self) -> Result<bool, StoreError> {
        let existed: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'json_data'",
                [],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;

        if !existed {
            debug!("Created capture schema");
        }
        Ok(!existed)
    }

    /// Number of stored captures
    pub fn count_captures(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM json_data", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("Negative count: {}", count)))
    }

    /// Read back a stored capture
    pub fn get_capture(&self, json_data_id: i64) -> Result<Option<StoredCapture>, StoreError> {
        let stored = self
            .conn
            .query_row(
                "SELECT json_data_id, partition_number, start_time, response_time, response_code,
                        url, api, script_name, script_pid, parameters, json_content, uuid
                 FROM json_data WHERE json_data_id = ?1",
                params![json_data_id],
                |row| {
                    Ok(StoredCapture {
                        json_data_id: row.get(0)?,
                        partition_number: row.get(1)?,
                        capture: NewCapture {
                            start_time: row.get::<_, NaiveDateTime>(2)?,
                            response_time: row.get::<_, NaiveDateTime>(3)?,
                            response_code: row.get(4)?,
                            url: row.get(5)?,
                            api: row.get(6)?,
                            script_name: row.get(7)?,
                            script_pid: row.get(8)?,
                            parameters: row.get(9)?,
                            json_content: row.get(10)?,
                            uuid: row.get(11)?,
                        },
                    })
                },
            )
            .optional()?;

        Ok(stored)
    }

    /// Number of objects queued for direct import
    pub fn count_imports(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM large_object_import", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| StoreError::InvalidData(format!("Negative count: {}", count)))
    }
}

impl CaptureStore for SqliteStore {
    type Error = StoreError;

    fn insert_capture(&mut self, capture: &NewCapture) -> Result<PersistedRow, Self::Error> {
        let tx = self.conn.transaction()?;

        let inserted = tx.query_row(
            INSERT_CAPTURE,
            params![
                capture.start_time,
                capture.response_time,
                capture.response_code,
                &capture.url,
                &capture.api,
                &capture.script_name,
                capture.script_pid,
                &capture.parameters,
                &capture.json_content,
                &capture.uuid,
            ],
            |row| {
                Ok(PersistedRow {
                    json_data_id: row.get(0)?,
                    partition_number: row.get(1)?,
                })
            },
        );

        match inserted {
            Ok(row) => {
                tx.commit()?;
                debug!("New record ID: {}", row.json_data_id);
                Ok(row)
            }
            Err(e) => {
                debug!("Error during SQL execution: {}; transaction will be rolled back", e);
                if let Err(rollback) = tx.rollback() {
                    warn!("Rollback failed: {}", rollback);
                }
                Err(StoreError::Database(e))
            }
        }
    }

    fn find_by_uuid(&self, uuid: &str) -> Result<Option<PersistedRow>, Self::Error> {
        let row = self
            .conn
            .query_row(SELECT_BY_UUID, params![uuid], |row| {
                Ok(PersistedRow {
                    json_data_id: row.get(0)?,
                    partition_number: row.get(1)?,
                })
            })
            .optional()?;

        Ok(row)
    }
}

impl LargeObjectImporter for SqliteStore {
    type Error = StoreError;

    fn import_object(&mut self, object: &ObjectRef) -> Result<ImportTicket, Self::Error> {
        let size = i64::try_from(object.size).map_err(|_| {
            StoreError::InvalidData(format!("Object size {} out of range", object.size))
        })?;

        // A repeat delivery refreshes the existing request instead of queueing a second one
        let import_id: i64 = self.conn.query_row(
            "INSERT INTO large_object_import (bucket, object_key, size, requested_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(bucket, object_key) DO UPDATE SET
             size = excluded.size, requested_at = excluded.requested_at
             RETURNING import_id",
            params![&object.bucket, &object.key, size, Utc::now().naive_utc()],
            |row| row.get(0),
        )?;

        debug!("Queued {} for direct import as request {}", object, import_id);

        Ok(ImportTicket {
            import_id,
            bucket: object.bucket.clone(),
            key: object.key.clone(),
        })
    }
}
