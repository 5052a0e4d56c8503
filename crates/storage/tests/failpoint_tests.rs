#![allow(clippy::expect_used, clippy::panic)]
//! Integration tests for fail-point injection in `MemoryBackend`.
//!
//! These tests require the `failpoints` feature:
//! ```bash
//! cargo test -p devgate-storage --features failpoints --test failpoint_tests
//! ```

use std::time::Duration;

use devgate_storage::{MemoryBackend, StorageBackend, StorageError};

#[tokio::test]
async fn set_failpoint_rejects_writes_without_side_effects() {
    let scenario = fail::FailScenario::setup();
    fail::cfg("memory-set", "return").expect("failed to configure fail point");

    let backend = MemoryBackend::new();
    let plain = backend.set(b"k".to_vec(), b"v".to_vec()).await;
    let with_ttl =
        backend.set_with_ttl(b"k".to_vec(), b"v".to_vec(), Duration::from_secs(60)).await;

    assert!(matches!(plain, Err(StorageError::Internal { .. })));
    assert!(matches!(with_ttl, Err(StorageError::Internal { .. })));
    assert!(backend.is_empty(), "rejected writes must not be applied");

    scenario.teardown();
}

#[tokio::test]
async fn delete_failpoint_keeps_existing_value() {
    let scenario = fail::FailScenario::setup();

    let backend = MemoryBackend::new();
    backend.set(b"k".to_vec(), b"v".to_vec()).await.expect("set before fail point");

    fail::cfg("memory-delete", "return").expect("failed to configure fail point");
    let result = backend.delete(b"k").await;

    assert!(result.is_err(), "delete should fail when fail point is active");
    assert!(backend.get(b"k").await.expect("get").is_some());

    scenario.teardown();
}

#[tokio::test]
async fn writes_succeed_without_failpoint() {
    let scenario = fail::FailScenario::setup();

    let backend = MemoryBackend::new();
    backend.set(b"k".to_vec(), b"v".to_vec()).await.expect("set should succeed");
    backend.delete(b"k").await.expect("delete should succeed");

    scenario.teardown();
}
