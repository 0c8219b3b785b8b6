//! Guarded writes: CAS tokens against the global revision

use crate::*;

#[test]
fn test_matching_token_succeeds() {
    let store = create_store(2);
    store.put("a", "1".into()).unwrap();

    let written = store.upsert("a", Some("2"), "2".into()).unwrap();
    assert_eq!(written.revision, Revision::new(3));
    assert_eq!(store.get("a").unwrap().value.value, "2");
}

#[test]
fn test_stale_token_reports_current_revision() {
    let store = create_store(2);
    store.put("a", "1".into()).unwrap();
    store.upsert("a", Some("2"), "2".into()).unwrap();

    let err = store.upsert("a", Some("2"), "x".into()).unwrap_err();
    assert!(err.is_conflict());
    assert!(err.is_retryable());
    assert_eq!(err.current_revision(), Some(Revision::new(3)));
    assert_eq!(store.get("a").unwrap().value.value, "2");
    assert_eq!(store.revision(), Revision::new(3));
}

#[test]
fn test_retry_with_reported_revision() {
    let store = create_store(2);
    store.put("a", "1".into()).unwrap();
    store.put("b", "1".into()).unwrap();

    let err = store
        .compare_and_put("a", Revision::new(2), "2".into())
        .unwrap_err();
    let current = err.current_revision().unwrap();
    let written = store.compare_and_put("a", current, "2".into()).unwrap();
    assert_eq!(written.revision, current.next());
}

#[test]
fn test_token_guards_creation() {
    let store = create_store(2);
    let written = store.upsert("new", Some("1"), "v".into()).unwrap();
    assert_eq!(written.revision, Revision::new(2));

    let err = store.upsert("other", Some("1"), "v".into()).unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_unset_tokens_are_blind() {
    let store = create_store(2);
    for token in [None, Some(""), Some("0")] {
        store.upsert("a", token, "v".into()).unwrap();
    }
    assert_eq!(store.revision(), Revision::new(4));
}

#[test]
fn test_non_integer_token() {
    let store = create_store(2);
    for token in ["abc", "1.5", "2a"] {
        let err = store.upsert("a", Some(token), "v".into()).unwrap_err();
        assert_eq!(err, Error::InvalidCasToken(token.into()));
    }
    assert!(store.is_empty());
}

#[test]
fn test_negative_token_never_matches() {
    let store = create_store(2);
    let err = store.upsert("a", Some("-1"), "v".into()).unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_capacity_checked_before_token() {
    let store = create_store(1);
    store.put("a", "1".into()).unwrap();

    let err = store.upsert("b", Some("abc"), "v".into()).unwrap_err();
    assert_eq!(err, Error::MaxCapacityReached { max_entries: 1 });
}

#[test]
fn test_token_parsing() {
    assert_eq!(CasToken::parse(None).unwrap(), CasToken::Unset);
    assert_eq!(CasToken::parse(Some("7")).unwrap(), CasToken::Expected(7));
    assert!(CasToken::parse(Some("7")).unwrap().is_guarded());
    assert!(!CasToken::parse(Some("0")).unwrap().is_guarded());
}
