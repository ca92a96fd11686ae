//! Tests for MemoryStore
//!
//! These tests verify:
//! - GET/SET/DEL semantics match Redis
//! - INCRBY/DECRBY create missing counters at zero
//! - Non-integer values and overflow are rejected
//! - Concurrent counter updates are not lost

use std::sync::Arc;

use recordkv::store::{MemoryStore, Store};

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[tokio::test]
async fn test_new_store_is_empty() {
    let store = MemoryStore::new();

    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.get("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_set_get() {
    let store = MemoryStore::new();

    store.set("key", "42").await.unwrap();

    assert_eq!(store.get("key").await.unwrap(), Some("42".to_string()));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_set_overwrites() {
    let store = MemoryStore::new();

    store.set("key", "1").await.unwrap();
    store.set("key", "2").await.unwrap();

    assert_eq!(store.get("key").await.unwrap(), Some("2".to_string()));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_del_reports_count() {
    let store = MemoryStore::new();
    store.set("key", "1").await.unwrap();

    assert_eq!(store.del("key").await.unwrap(), 1);
    assert_eq!(store.del("key").await.unwrap(), 0);
    assert_eq!(store.get("key").await.unwrap(), None);
}

#[tokio::test]
async fn test_ping() {
    let store = MemoryStore::new();
    store.ping().await.unwrap();
}

// =============================================================================
// Counter Tests
// =============================================================================

#[tokio::test]
async fn test_incr_by_existing() {
    let store = MemoryStore::new();
    store.set("n", "10").await.unwrap();

    assert_eq!(store.incr_by("n", 5).await.unwrap(), 15);
    assert_eq!(store.get("n").await.unwrap(), Some("15".to_string()));
}

#[tokio::test]
async fn test_decr_by_existing() {
    let store = MemoryStore::new();
    store.set("n", "10").await.unwrap();

    assert_eq!(store.decr_by("n", 15).await.unwrap(), -5);
    assert_eq!(store.get("n").await.unwrap(), Some("-5".to_string()));
}

#[tokio::test]
async fn test_incr_by_missing_key_starts_at_zero() {
    let store = MemoryStore::new();

    assert_eq!(store.incr_by("fresh", 3).await.unwrap(), 3);
    assert_eq!(store.decr_by("other", 3).await.unwrap(), -3);
}

#[tokio::test]
async fn test_incr_by_non_integer_fails() {
    let store = MemoryStore::new();
    store.set("text", "abc").await.unwrap();

    assert!(store.incr_by("text", 1).await.is_err());
    // Value left untouched
    assert_eq!(store.get("text").await.unwrap(), Some("abc".to_string()));
}

#[tokio::test]
async fn test_incr_by_overflow_fails() {
    let store = MemoryStore::new();
    store.set("max", &i64::MAX.to_string()).await.unwrap();

    assert!(store.incr_by("max", 1).await.is_err());
    assert_eq!(store.get("max").await.unwrap(), Some(i64::MAX.to_string()));
}

#[tokio::test]
async fn test_decr_by_min_term_fails() {
    let store = MemoryStore::new();
    store.set("n", "0").await.unwrap();

    assert!(store.decr_by("n", i64::MIN).await.is_err());
}

// =============================================================================
// Concurrent Access Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments() {
    let store = Arc::new(MemoryStore::new());
    store.set("counter", "0").await.unwrap();

    let mut handles = vec![];

    for _ in 0..10 {
        let st = Arc::clone(&store);
        let handle = tokio::spawn(async move {
            for _ in 0..100 {
                st.incr_by("counter", 1).await.unwrap();
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.get("counter").await.unwrap(), Some("1000".to_string()));
}
