//! Concurrency Tests
//!
//! Tests for thread safety:
//! - Concurrent blind writes
//! - CAS under contention
//! - Capacity under racing creators
//! - Listing during writes

use crate::*;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

/// Every blind write gets its own revision
#[test]
fn test_concurrent_blind_writes_get_distinct_revisions() {
    let store = create_store(1_000);

    const NUM_WRITERS: usize = 8;
    const WRITES_PER_THREAD: usize = 50;

    let barrier = Arc::new(Barrier::new(NUM_WRITERS));
    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|i| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..WRITES_PER_THREAD)
                    .map(|j| {
                        let key = format!("t{}_{}", i, j % 5);
                        store.put(&key, "v".into()).unwrap().revision
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for h in handles {
        for revision in h.join().unwrap() {
            assert!(seen.insert(revision), "revision {} issued twice", revision);
        }
    }

    let total = (NUM_WRITERS * WRITES_PER_THREAD) as u64;
    assert_eq!(store.revision(), Revision::new(1 + total));
}

/// With all writers holding the same token, exactly one wins
#[test]
fn test_cas_contention_single_winner() {
    let store = create_store(10);
    store.put("counter", "0".into()).unwrap();
    let token = store.revision();

    const NUM_WRITERS: usize = 10;

    let barrier = Arc::new(Barrier::new(NUM_WRITERS));
    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|i| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.compare_and_put("counter", token, i.to_string().into())
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);

    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(err.is_conflict());
        assert_eq!(err.current_revision(), Some(token.next()));
    }
}

/// Retrying on conflict never loses an increment
#[test]
fn test_cas_retry_loop_no_lost_updates() {
    let store = create_store(10);
    store.put("counter", "0".into()).unwrap();

    const NUM_WRITERS: usize = 4;
    const INCREMENTS: usize = 25;

    let barrier = Arc::new(Barrier::new(NUM_WRITERS));
    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|_| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..INCREMENTS {
                    loop {
                        let current = store.get("counter").unwrap();
                        let n: u64 = current.value.value.parse().unwrap();
                        match store.compare_and_put(
                            "counter",
                            current.revision,
                            (n + 1).to_string().into(),
                        ) {
                            Ok(_) => break,
                            Err(e) if e.is_retryable() => continue,
                            Err(e) => panic!("unexpected error: {}", e),
                        }
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let final_value = store.get("counter").unwrap().value.value;
    assert_eq!(final_value, (NUM_WRITERS * INCREMENTS).to_string());
}

/// Racing creators never push the store past its limit
#[test]
fn test_capacity_holds_under_racing_creators() {
    const MAX: usize = 5;
    const NUM_WRITERS: usize = 20;

    let store = create_store(MAX);
    let barrier = Arc::new(Barrier::new(NUM_WRITERS));
    let handles: Vec<_> = (0..NUM_WRITERS)
        .map(|i| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.put(&numbered_key(i), "v".into()).is_ok()
            })
        })
        .collect();

    let created = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(created, MAX);
    assert_eq!(store.len(), MAX);
}

/// Pages taken during writes are always sorted
#[test]
fn test_listing_during_writes() {
    let store = create_paged_store(1_000, 10);
    populate(&store, 20);

    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 20..200 {
                store.put(&numbered_key(i), "v".into()).unwrap();
            }
        })
    };

    for _ in 0..100 {
        let page = store.list(Some("2")).unwrap().value;
        assert_eq!(page.entries.len(), 10);
        assert!(page.entries.windows(2).all(|w| w[0].key < w[1].key));
    }

    writer.join().unwrap();
    assert_eq!(store.len(), 200);
}
