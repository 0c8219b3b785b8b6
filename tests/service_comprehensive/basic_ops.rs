//! Basic operations: put, get, delete, revision bookkeeping

use crate::*;
use chrono::{TimeZone, Utc};

#[test]
fn test_fresh_store() {
    let store = create_store(2);
    assert_eq!(store.revision(), Revision::INITIAL);
    assert!(store.is_empty());
    assert!(store.keys().is_empty());
}

#[test]
fn test_put_then_get() {
    let store = create_store(2);
    let written = store.put("a", "1".into()).unwrap();
    assert_eq!(written.revision, Revision::new(2));
    assert_eq!(written.value.key, "a");

    let read = store.get("a").unwrap();
    assert_eq!(read.value.value, "1");
    assert_eq!(read.revision, Revision::new(2));
}

#[test]
fn test_each_write_advances_revision_by_one() {
    let store = create_store(10);
    for i in 0..5 {
        let before = store.revision();
        let written = store.put(&numbered_key(i % 2), "v".into()).unwrap();
        assert_eq!(written.revision, before.next());
        assert_eq!(store.revision(), written.revision);
    }
}

#[test]
fn test_overwrite_replaces_value() {
    let store = create_store(2);
    store.put("a", "1".into()).unwrap();
    store.put("a", "2".into()).unwrap();

    let entry = store.get("a").unwrap().value;
    assert_eq!(entry.value, "2");
    assert_eq!(entry.revision, 2);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_explicit_timestamp_preserved() {
    let store = create_store(2);
    let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    store
        .put("a", EntryInput::new("v").with_timestamp(ts))
        .unwrap();
    assert_eq!(store.get("a").unwrap().value.timestamp, ts);
}

#[test]
fn test_payload_drives_write() {
    let store = create_store(2);
    let payload = UpsertPayload::from_json(br#"{"key":"ignored","value":"x","timestamp":60}"#)
        .unwrap();
    let input = payload.into_input().unwrap();
    let written = store.upsert("a", None, input).unwrap();

    assert_eq!(written.value.key, "a");
    assert_eq!(written.value.value, "x");
    assert_eq!(written.value.timestamp.timestamp(), 60);
    assert!(!store.keys().contains(&"ignored".to_string()));
}

#[test]
fn test_get_missing_key() {
    let store = create_store(2);
    let err = store.get("missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err, Error::KeyNotFound("missing".into()));
}

#[test]
fn test_delete_returns_removed_entry() {
    let store = create_store(2);
    store.put("a", "1".into()).unwrap();

    let removed = store.delete("a").unwrap();
    assert_eq!(removed.value.value, "1");
    assert!(store.get("a").unwrap_err().is_not_found());
    assert!(store.is_empty());
}

#[test]
fn test_delete_does_not_advance_revision() {
    let store = create_store(2);
    store.put("a", "1".into()).unwrap();
    let before = store.revision();

    let removed = store.delete("a").unwrap();
    assert_eq!(removed.revision, before);
    assert_eq!(store.revision(), before);
}

#[test]
fn test_double_delete() {
    let store = create_store(2);
    store.put("a", "1".into()).unwrap();
    store.delete("a").unwrap();
    assert!(store.delete("a").unwrap_err().is_not_found());
}

#[test]
fn test_empty_key_rejected() {
    let store = create_store(2);
    let err = store.put("", "v".into()).unwrap_err();
    assert_eq!(err.code(), "InvalidKey");
    assert_eq!(store.revision(), Revision::INITIAL);
}
