//! Integration tests for retriever-store
//!
//! These tests verify the insert/lookup contract for captures and the
//! large-object import queue.

use chrono::{DateTime, NaiveDateTime};
use retriever_domain::traits::{CaptureStore, FailureKind, LargeObjectImporter, StoreFailure};
use retriever_domain::{NewCapture, ObjectRef};
use retriever_store::SqliteStore;

fn at(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
}

fn capture(uuid: &str) -> NewCapture {
    NewCapture {
        start_time: at(1000),
        response_time: at(1001),
        response_code: 200,
        url: "https://x/api/call".to_string(),
        api: "api".to_string(),
        script_name: "s".to_string(),
        script_pid: 100,
        parameters: "{}".to_string(),
        json_content: r#"{"body": "text"}"#.to_string(),
        uuid: uuid.to_string(),
    }
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert!(store.unwrap().created_schema());
}

#[test]
fn test_insert_and_get_capture() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let capture = capture("444abb55-afe0-40f7-9791-c824ac396a75");

    let row = store.insert_capture(&capture).unwrap();
    assert!(row.json_data_id > 0);

    let stored = store.get_capture(row.json_data_id).unwrap().unwrap();
    assert_eq!(stored.json_data_id, row.json_data_id);
    assert_eq!(stored.partition_number, row.partition_number);
    assert_eq!(stored.capture, capture);
}

#[test]
fn test_partition_number_follows_uuid() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let low = store
        .insert_capture(&capture("044abb55-afe0-40f7-9791-c824ac396a75"))
        .unwrap();
    let high = store
        .insert_capture(&capture("f44abb55-afe0-40f7-9791-c824ac396a75"))
        .unwrap();
    let upper = store
        .insert_capture(&capture("A44abb55-afe0-40f7-9791-c824ac396a75"))
        .unwrap();

    assert_eq!(low.partition_number, 0);
    assert_eq!(high.partition_number, 15);
    assert_eq!(upper.partition_number, 10);
}

#[test]
fn test_find_by_uuid() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let uuid = "444abb55-afe0-40f7-9791-c824ac396a75";

    assert_eq!(store.find_by_uuid(uuid).unwrap(), None);

    let row = store.insert_capture(&capture(uuid)).unwrap();
    assert_eq!(store.find_by_uuid(uuid).unwrap(), Some(row));
}

#[test]
fn test_duplicate_uuid_is_a_conflict() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let uuid = "444abb55-afe0-40f7-9791-c824ac396a75";

    assert!(store.insert_capture(&capture(uuid)).is_ok());

    let err = store.insert_capture(&capture(uuid)).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Conflict);
    assert!(err.is_conflict());

    // The failed insert left nothing behind
    assert_eq!(store.count_captures().unwrap(), 1);
}

#[test]
fn test_store_usable_after_rollback() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let uuid = "444abb55-afe0-40f7-9791-c824ac396a75";

    store.insert_capture(&capture(uuid)).unwrap();
    assert!(store.insert_capture(&capture(uuid)).is_err());

    let next = store
        .insert_capture(&capture("555abb55-afe0-40f7-9791-c824ac396a75"))
        .unwrap();
    assert!(next.json_data_id > 0);
    assert_eq!(store.count_captures().unwrap(), 2);
}

#[test]
fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.db");
    let uuid = "444abb55-afe0-40f7-9791-c824ac396a75";

    let row = {
        let mut store = SqliteStore::new(&path).unwrap();
        store.insert_capture(&capture(uuid)).unwrap()
    };

    let store = SqliteStore::new(&path).unwrap();
    assert!(!store.created_schema());
    assert_eq!(store.find_by_uuid(uuid).unwrap(), Some(row));
}

#[test]
fn test_import_object_reuses_ticket() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let object = ObjectRef::new("capture-bucket", "big.json", 50_000_000);

    let first = store.import_object(&object).unwrap();
    assert_eq!(first.bucket, "capture-bucket");
    assert_eq!(first.key, "big.json");

    let again = store.import_object(&object).unwrap();
    assert_eq!(again.import_id, first.import_id);
    assert_eq!(store.count_imports().unwrap(), 1);

    let other = store
        .import_object(&ObjectRef::new("capture-bucket", "bigger.json", 60_000_000))
        .unwrap();
    assert_ne!(other.import_id, first.import_id);
    assert_eq!(store.count_imports().unwrap(), 2);
}
