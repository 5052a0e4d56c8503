//! Storage backend trait definition.
//!
//! [`StorageBackend`] is the seam between the access gate and whatever durable
//! key/value store the host provides (a settings table, a transient cache, the
//! in-memory backend in tests). Keys and values are bytes; the gate owns the
//! encoding of what it stores.
//!
//! # Implementing a Backend
//!
//! 1. Implement the [`StorageBackend`] trait
//! 2. Treat expired keys as absent on every read path
//! 3. Map backend-specific errors to [`StorageError`](crate::StorageError), surfacing rejected
//!    writes as errors rather than dropping them
//!
//! See [`MemoryBackend`](crate::MemoryBackend) for a reference implementation.

use std::{ops::RangeBounds, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{error::StorageResult, types::KeyValue};

/// Abstract storage backend for key-value operations.
///
/// Backends must be `Send + Sync`. Concurrent writers to the same key are
/// resolved last-writer-wins; no stronger coordination is expected.
///
/// | Method | Description |
/// |--------|-------------|
/// | [`get`](StorageBackend::get) | Retrieve a single value by key |
/// | [`set`](StorageBackend::set) | Store a key-value pair |
/// | [`set_with_ttl`](StorageBackend::set_with_ttl) | Store with automatic expiration |
/// | [`delete`](StorageBackend::delete) | Remove a key |
/// | [`get_range`](StorageBackend::get_range) | Retrieve keys in a range |
/// | [`clear_range`](StorageBackend::clear_range) | Delete keys in a range |
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use devgate_storage::{MemoryBackend, StorageBackend};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let backend = MemoryBackend::new();
///
/// backend.set(b"key".to_vec(), b"value".to_vec()).await.unwrap();
/// let value = backend.get(b"key").await.unwrap();
/// assert_eq!(value, Some(Bytes::from("value")));
/// # });
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Retrieves a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(bytes))` if the key exists and has not expired
    /// - `Ok(None)` if the key is absent or expired
    /// - `Err(...)` on storage errors
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>>;

    /// Stores a key-value pair, overwriting any previous value.
    ///
    /// Any TTL previously attached to the key is cleared.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()>;

    /// Stores a key-value pair that expires after `ttl`.
    ///
    /// Overwrites any previous value and replaces any previous deadline. Once
    /// the deadline passes, reads behave as if the key were absent. Physical
    /// removal may happen later.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn set_with_ttl(&self, key: Vec<u8>, value: Vec<u8>, ttl: Duration) -> StorageResult<()>;

    /// Deletes a key.
    ///
    /// Deleting a key that does not exist is a no-op and returns `Ok(())`.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn delete(&self, key: &[u8]) -> StorageResult<()>;

    /// Retrieves all live key-value pairs within a range, in key order.
    ///
    /// Combine with [`prefix_range`](crate::prefix_range) to scan a namespace.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send;

    /// Deletes all keys within a range.
    #[must_use = "storage operations may fail and errors must be handled"]
    async fn clear_range<R>(&self, range: R) -> StorageResult<()>
    where
        R: RangeBounds<Vec<u8>> + Send;
}
