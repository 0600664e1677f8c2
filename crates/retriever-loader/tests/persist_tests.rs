//! Integration tests for the persistence coordinator

use retriever_domain::traits::{CaptureStore, FailureKind, StoreFailure};
use retriever_domain::{CapturedRecord, NewCapture, PersistedRow};
use retriever_gatekeeper::Gatekeeper;
use retriever_loader::{LoadError, Loader, PersistPath};
use retriever_store::SqliteStore;
use std::cell::Cell;
use std::fmt;

fn record() -> CapturedRecord {
    CapturedRecord {
        bucket: "some-s3-name".to_string(),
        object_key: "body_getTSData_24640_mod_444abb55-afe0-40f7-9791-c824ac396a75.json".to_string(),
        uuid: "444abb55-afe0-40f7-9791-c824ac396a75".to_string(),
        content: r#"{"body": "text"}"#.to_string(),
        url: "https://x/api/call".to_string(),
        api: "api".to_string(),
        parameters: "{}".to_string(),
        start_time: "1000".to_string(),
        script_pid: "100".to_string(),
        script_name: "s".to_string(),
        response_time: "1001".to_string(),
        response_code: "200".to_string(),
        ..CapturedRecord::default()
    }
}

fn sqlite_loader() -> Loader<SqliteStore> {
    Loader::new(SqliteStore::new(":memory:").unwrap(), Gatekeeper::default())
}

#[test]
fn test_persist_inserts_row() {
    let mut loader = sqlite_loader();

    let outcome = loader.persist(&record()).unwrap();
    assert_eq!(outcome.path, PersistPath::Inserted);
    assert!(outcome.row.json_data_id > 0);
    // Leading hex digit '4'
    assert_eq!(outcome.row.partition_number, 4);

    let stored = loader
        .store()
        .get_capture(outcome.row.json_data_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.capture.response_code, 200);
    assert_eq!(stored.capture.script_pid, 100);
    assert_eq!(stored.capture.api, "api");
    assert_eq!(stored.capture.start_time.to_string(), "1970-01-01 00:16:40");
    assert_eq!(stored.capture.json_content, r#"{"body": "text"}"#);
}

#[test]
fn test_persist_is_idempotent_by_uuid() {
    let mut loader = sqlite_loader();

    let first = loader.persist(&record()).unwrap();
    let second = loader.persist(&record()).unwrap();

    assert_eq!(first.path, PersistPath::Inserted);
    assert_eq!(second.path, PersistPath::ConflictRetried);
    assert_eq!(first.row, second.row);
    assert_eq!(loader.store().count_captures().unwrap(), 1);
}

#[test]
fn test_blank_api_stored_as_fallback() {
    let mut loader = sqlite_loader();
    let mut record = record();
    record.api = String::new();

    let outcome = loader.persist(&record).unwrap();
    let stored = loader
        .store()
        .get_capture(outcome.row.json_data_id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.capture.api, "API");
}

#[test]
fn test_validation_order_reports_first_failure() {
    let mut loader = sqlite_loader();
    let mut record = record();
    record.start_time = String::new();
    record.response_code = "700".to_string();

    match loader.persist(&record) {
        Err(LoadError::Validation(err)) => assert_eq!(err.field_name, "Start Time"),
        other => panic!("Expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_bad_uuid_rejected() {
    let mut loader = sqlite_loader();
    let mut record = record();
    record.uuid = "mod_444abb55-afe0-40f7-9791".to_string();

    match loader.persist(&record) {
        Err(LoadError::Validation(err)) => {
            assert_eq!(err.field_name, "UUID");
            assert_eq!(err.actual, "mod_444abb55-afe0-40f7-9791");
        }
        other => panic!("Expected a validation error, got {:?}", other),
    }
    assert_eq!(loader.store().count_captures().unwrap(), 0);
}

#[test]
fn test_non_numeric_time_rejected_before_insert() {
    let mut loader = sqlite_loader();
    let mut record = record();
    record.response_time = "later".to_string();

    match loader.persist(&record) {
        Err(LoadError::Validation(err)) => {
            assert_eq!(err.field_name, "Response Time");
            assert_eq!(err.message, "Timestamp value required");
        }
        other => panic!("Expected a validation error, got {:?}", other),
    }
    assert_eq!(loader.store().count_captures().unwrap(), 0);
}

// Scripted store for paths SQLite cannot easily produce

#[derive(Debug)]
struct ScriptedError(FailureKind);

impl fmt::Display for ScriptedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scripted {:?} failure", self.0)
    }
}

impl StoreFailure for ScriptedError {
    fn kind(&self) -> FailureKind {
        self.0
    }
}

#[derive(Default)]
struct ScriptedStore {
    insert_failure: Option<FailureKind>,
    existing: Option<PersistedRow>,
    inserts: usize,
    lookups: Cell<usize>,
}

impl CaptureStore for ScriptedStore {
    type Error = ScriptedError;

    fn insert_capture(&mut self, _capture: &NewCapture) -> Result<PersistedRow, Self::Error> {
        self.inserts += 1;
        match self.insert_failure {
            Some(kind) => Err(ScriptedError(kind)),
            None => Ok(PersistedRow {
                json_data_id: 7,
                partition_number: 3,
            }),
        }
    }

    fn find_by_uuid(&self, _uuid: &str) -> Result<Option<PersistedRow>, Self::Error> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.existing)
    }
}

#[test]
fn test_out_of_range_code_never_reaches_storage() {
    let mut loader = Loader::new(ScriptedStore::default(), Gatekeeper::default());
    let mut record = record();
    record.response_code = "700".to_string();

    match loader.persist(&record) {
        Err(LoadError::Validation(err)) => {
            assert_eq!(err.field_name, "Response Code");
            assert_eq!(err.expected, "must be a number from 100 to 599");
            assert_eq!(err.actual, "700");
        }
        other => panic!("Expected a validation error, got {:?}", other),
    }
    assert_eq!(loader.store().inserts, 0);
}

#[test]
fn test_operational_failure_is_storage_error() {
    let store = ScriptedStore {
        insert_failure: Some(FailureKind::Operational),
        ..ScriptedStore::default()
    };
    let mut loader = Loader::new(store, Gatekeeper::default());

    let result = loader.persist(&record());
    assert!(matches!(result, Err(LoadError::Storage(_))));
    assert_eq!(loader.store().inserts, 1);
    assert_eq!(loader.store().lookups.get(), 0);
}

#[test]
fn test_data_failure_is_not_retried() {
    let store = ScriptedStore {
        insert_failure: Some(FailureKind::Data),
        existing: Some(PersistedRow {
            json_data_id: 1,
            partition_number: 1,
        }),
        ..ScriptedStore::default()
    };
    let mut loader = Loader::new(store, Gatekeeper::default());

    assert!(matches!(loader.persist(&record()), Err(LoadError::Storage(_))));
}

#[test]
fn test_conflict_without_existing_row_is_storage_error() {
    let store = ScriptedStore {
        insert_failure: Some(FailureKind::Conflict),
        ..ScriptedStore::default()
    };
    let mut loader = Loader::new(store, Gatekeeper::default());

    match loader.persist(&record()) {
        Err(LoadError::Storage(detail)) => assert!(detail.contains("no existing row")),
        other => panic!("Expected a storage error, got {:?}", other),
    }
}

#[test]
fn test_conflict_returns_existing_row() {
    let existing = PersistedRow {
        json_data_id: 41,
        partition_number: 9,
    };
    let store = ScriptedStore {
        insert_failure: Some(FailureKind::Conflict),
        existing: Some(existing),
        ..ScriptedStore::default()
    };
    let mut loader = Loader::new(store, Gatekeeper::default());

    let outcome = loader.persist(&record()).unwrap();
    assert_eq!(outcome.path, PersistPath::ConflictRetried);
    assert_eq!(outcome.row, existing);
    assert_eq!(loader.store().lookups.get(), 1);
}
