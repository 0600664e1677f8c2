//! Core persistence coordinator

use crate::error::LoadError;
use chrono::{DateTime, NaiveDateTime};
use retriever_domain::traits::{CaptureStore, StoreFailure};
use retriever_domain::{CapturedRecord, NewCapture, PersistedRow};
use retriever_gatekeeper::{Gatekeeper, ValidationError};
use tracing::{debug, error, info, warn};

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// How a successful persist reached its row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistPath {
    /// A new row was inserted
    Inserted,

    /// The uuid was already stored; the existing row was looked up
    ConflictRetried,
}

/// Result of a successful persist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Identifiers of the row holding the record
    pub row: PersistedRow,

    /// Which terminal state produced the row
    pub path: PersistPath,
}

/// Validates captured records and writes them to a store
pub struct Loader<S>
where
    S: CaptureStore,
{
    store: S,
    gatekeeper: Gatekeeper,
}

impl<S> Loader<S>
where
    S: CaptureStore,
{
    /// Create a new Loader
    pub fn new(store: S, gatekeeper: Gatekeeper) -> Self {
        Self { store, gatekeeper }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The underlying store, mutably
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the loader, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate a record and persist it
    ///
    /// Any validation failure aborts before storage is touched.
    pub fn persist(&mut self, record: &CapturedRecord) -> Result<PersistOutcome, LoadError> {
        debug!("Validating record {}", record.uuid);

        let capture = self.prepare(record).map_err(|e| {
            warn!("Validation failed for {}: {}", record.object_key, e);
            LoadError::Validation(e)
        })?;

        debug!("Inserting record {} into the database", capture.uuid);
        self.insert(&capture)
    }

    /// Run every field check in order and build the insert row
    pub fn prepare(&self, record: &CapturedRecord) -> Result<NewCapture, ValidationError> {
        let gatekeeper = &self.gatekeeper;

        gatekeeper.validate_time("Start Time", &record.start_time)?;
        gatekeeper.validate_time("Response Time", &record.response_time)?;

        gatekeeper.validate_code(&record.response_code)?;
        gatekeeper.validate_pid(&record.script_pid)?;

        gatekeeper.validate_url(&record.url)?;
        let api = gatekeeper.validate_api(&record.api, &record.url)?;

        gatekeeper.validate_json("Parameters", &record.parameters)?;
        gatekeeper.validate_json("JSON Data", &record.content)?;

        gatekeeper.validate_uuid("UUID", &record.uuid)?;

        let config = gatekeeper.config();
        Ok(NewCapture {
            start_time: epoch_to_datetime("Start Time", &record.start_time)?,
            response_time: epoch_to_datetime("Response Time", &record.response_time)?,
            response_code: to_i32(
                "Response Code",
                &record.response_code,
                config.response_code.low,
                config.response_code.high,
            )?,
            url: record.url.clone(),
            api,
            script_name: record.script_name.clone(),
            script_pid: to_i32(
                "PIDs",
                &record.script_pid,
                config.script_pid.low,
                config.script_pid.high,
            )?,
            parameters: record.parameters.clone(),
            json_content: record.content.clone(),
            uuid: record.uuid.clone(),
        })
    }

    fn insert(&mut self, capture: &NewCapture) -> Result<PersistOutcome, LoadError> {
        let conflict = match self.store.insert_capture(capture) {
            Ok(row) => {
                info!(
                    "Inserted {} as record {} in partition {}",
                    capture.uuid, row.json_data_id, row.partition_number
                );
                return Ok(PersistOutcome {
                    row,
                    path: PersistPath::Inserted,
                });
            }
            Err(e) if e.is_conflict() => e,
            Err(e) => {
                error!("Insert of {} failed ({:?}): {}", capture.uuid, e.kind(), e);
                return Err(LoadError::Storage(e.to_string()));
            }
        };

        info!(
            "Record {} already stored ({}); looking it up",
            capture.uuid, conflict
        );

        match self.store.find_by_uuid(&capture.uuid) {
            Ok(Some(row)) => {
                debug!("Found existing record {}", row.json_data_id);
                Ok(PersistOutcome {
                    row,
                    path: PersistPath::ConflictRetried,
                })
            }
            Ok(None) => {
                error!("Conflict on {} but no row carries that uuid", capture.uuid);
                Err(LoadError::Storage(format!(
                    "Conflict on uuid {} with no existing row: {}",
                    capture.uuid, conflict
                )))
            }
            Err(e) => {
                error!("Lookup of {} failed: {}", capture.uuid, e);
                Err(LoadError::Storage(e.to_string()))
            }
        }
    }
}

/// Convert epoch seconds (integer or fractional) to a UTC datetime
///
/// Rounds to the microsecond.
fn epoch_to_datetime(field_name: &str, actual: &str) -> Result<NaiveDateTime, ValidationError> {
    let invalid = || {
        ValidationError::new(
            "Timestamp value required",
            field_name,
            "seconds since the Unix epoch",
            actual,
        )
    };

    let seconds: f64 = actual.trim().parse().map_err(|_| invalid())?;
    if !seconds.is_finite() {
        return Err(invalid());
    }

    let whole = seconds.floor();
    let mut micros = ((seconds - whole) * MICROS_PER_SEC).round() as u32;
    let mut secs = whole as i64;
    if micros >= MICROS_PER_SEC as u32 {
        secs += 1;
        micros = 0;
    }

    DateTime::from_timestamp(secs, micros * 1_000)
        .map(|dt| dt.naive_utc())
        .ok_or_else(invalid)
}

/// Coerce an already range-checked integer field
fn to_i32(field_name: &str, actual: &str, low: i64, high: i64) -> Result<i32, ValidationError> {
    actual.trim().parse::<i32>().map_err(|_| {
        ValidationError::new(
            "Integer value required",
            field_name,
            format!("must be a number from {} to {}", low, high),
            actual,
        )
    })
}
