//! Paginated listing over the sorted key index

use crate::*;

#[test]
fn test_twenty_five_keys_in_three_pages() {
    let store = create_store(100);
    populate(&store, 25);

    let sizes: Vec<usize> = (1..=3)
        .map(|n| store.list(Some(&n.to_string())).unwrap().value.entries.len())
        .collect();
    assert_eq!(sizes, vec![10, 10, 5]);

    let err = store.list(Some("4")).unwrap_err();
    assert!(matches!(err, Error::InvalidPage(_)));
}

#[test]
fn test_pages_are_sorted_and_disjoint() {
    let store = create_paged_store(100, 7);
    for i in (0..30).rev() {
        store.put(&numbered_key(i), "v".into()).unwrap();
    }

    let keys = walk_all_pages(&store);
    let expected: Vec<String> = (0..30).map(numbered_key).collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_default_page_is_first() {
    let store = create_store(100);
    populate(&store, 12);
    assert_eq!(store.list(None).unwrap(), store.list(Some("1")).unwrap());
    assert_eq!(store.list(Some("")).unwrap(), store.list(Some("1")).unwrap());
}

#[test]
fn test_page_reports_revision_and_total() {
    let store = create_store(100);
    populate(&store, 12);

    let listed = store.list(Some("2")).unwrap();
    assert_eq!(listed.revision, store.revision());
    assert_eq!(listed.value.total, 12);
    assert_eq!(listed.value.number, PageNumber::new(2).unwrap());
    assert!(!listed.value.has_next());
}

#[test]
fn test_empty_store_listing() {
    let store = create_store(2);
    let first = store.list(None).unwrap();
    assert!(first.value.entries.is_empty());
    assert!(matches!(store.list(Some("2")), Err(Error::InvalidPage(_))));
}

#[test]
fn test_bad_page_numbers() {
    let store = create_store(2);
    for raw in ["0", "-1", "one", "1.0"] {
        assert!(
            matches!(store.list(Some(raw)), Err(Error::InvalidPage(_))),
            "page {:?} should be invalid",
            raw
        );
    }
}

#[test]
fn test_exact_multiple_of_page_size() {
    let store = create_store(100);
    populate(&store, 20);
    assert!(store.list(Some("1")).unwrap().value.has_next());
    assert!(!store.list(Some("2")).unwrap().value.has_next());
    assert!(store.list(Some("3")).is_err());
}

#[test]
fn test_deleted_keys_leave_listing() {
    let store = create_store(100);
    populate(&store, 5);
    store.delete(&numbered_key(2)).unwrap();

    let keys = walk_all_pages(&store);
    assert_eq!(keys.len(), 4);
    assert!(!keys.contains(&numbered_key(2)));
}
