//! In-memory storage backend implementation.
//!
//! [`MemoryBackend`] is the reference [`StorageBackend`]: an ordered map behind
//! a [`parking_lot::RwLock`], with per-key expiry that mirrors the transient
//! storage of the host platform.
//!
//! # Example
//!
//! ```
//! use devgate_storage::{MemoryBackend, StorageBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = MemoryBackend::new();
//!
//!     backend.set(b"devgate_credential".to_vec(), b"hunter22".to_vec()).await.unwrap();
//!     let value = backend.get(b"devgate_credential").await.unwrap();
//!
//!     assert_eq!(value.unwrap().as_ref(), b"hunter22");
//! }
//! ```
//!
//! # Expiry
//!
//! Expired keys are invisible to every read as soon as their deadline passes.
//! A background task additionally sweeps them out of memory once per second;
//! it only reclaims space and never affects what callers observe.
//!
//! Deadlines use [`tokio::time::Instant`], so tests running with a paused
//! clock can advance past a TTL without sleeping.

use std::{
    collections::BTreeMap,
    ops::{Bound, RangeBounds},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use tokio::{
    select,
    sync::watch,
    time::{Instant, sleep},
};

use crate::{
    backend::StorageBackend,
    error::{StorageError, StorageResult},
    size_limits::{SizeLimits, validate_sizes},
    types::KeyValue,
};

/// Interval between background sweeps of expired keys.
const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

type DataMap = Arc<RwLock<BTreeMap<Vec<u8>, Bytes>>>;
type DeadlineMap = Arc<RwLock<BTreeMap<Vec<u8>, Instant>>>;

/// Holds the shutdown signal sender. When dropped, the watch channel
/// closes and the sweep task exits.
struct ShutdownGuard {
    shutdown_tx: watch::Sender<()>,
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        // Best-effort; the receiver may already be gone.
        let _ = self.shutdown_tx.send(());
    }
}

/// In-memory storage backend.
///
/// Intended for tests and single-process development setups. Data is lost
/// when the process exits.
///
/// # Cloning
///
/// `MemoryBackend` is cheaply cloneable. All clones share the same data, and
/// the sweep task stops once the last clone is dropped or
/// [`shutdown`](Self::shutdown) is called.
#[derive(Clone)]
pub struct MemoryBackend {
    data: DataMap,
    deadlines: DeadlineMap,
    limits: SizeLimits,
    shutdown_guard: Arc<ShutdownGuard>,
}

impl MemoryBackend {
    /// Creates a new backend with default [`SizeLimits`].
    ///
    /// Must be called from within a tokio runtime: the expiry sweep is
    /// spawned onto it.
    pub fn new() -> Self {
        Self::with_limits(SizeLimits::default())
    }

    /// Creates a new backend enforcing the given size limits on every write.
    pub fn with_limits(limits: SizeLimits) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let backend = Self {
            data: Arc::new(RwLock::new(BTreeMap::new())),
            deadlines: Arc::new(RwLock::new(BTreeMap::new())),
            limits,
            shutdown_guard: Arc::new(ShutdownGuard { shutdown_tx }),
        };

        // The task owns only the maps, never the guard, so dropping the last
        // clone of the backend really does close the channel.
        let data = Arc::clone(&backend.data);
        let deadlines = Arc::clone(&backend.deadlines);
        tokio::spawn(sweep_expired_keys(data, deadlines, shutdown_rx));

        backend
    }

    /// Signals the background sweep task to stop.
    ///
    /// Optional; the task also stops when all clones are dropped. Reads keep
    /// honouring deadlines after shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_guard.shutdown_tx.send(());
    }

    /// Number of keys physically held, including expired ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns `true` if no keys are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn is_expired(&self, key: &[u8]) -> bool {
        self.deadlines.read().get(key).is_some_and(|deadline| *deadline <= Instant::now())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

async fn sweep_expired_keys(
    data: DataMap,
    deadlines: DeadlineMap,
    mut shutdown_rx: watch::Receiver<()>,
) {
    loop {
        select! {
            _ = sleep(SWEEP_INTERVAL) => {}
            _ = shutdown_rx.changed() => return,
        }

        let now = Instant::now();
        let expired: Vec<Vec<u8>> = deadlines
            .read()
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();

        if expired.is_empty() {
            continue;
        }

        // Lock order: data, then deadlines.
        let mut data_guard = data.write();
        let mut deadline_guard = deadlines.write();
        for key in expired {
            // A concurrent write may have refreshed the deadline since the scan.
            if deadline_guard.get(&key).is_some_and(|deadline| *deadline <= now) {
                data_guard.remove(&key);
                deadline_guard.remove(&key);
            }
        }
        tracing::trace!(remaining = data_guard.len(), "swept expired keys");
    }
}

fn to_slice_bound(bound: Bound<&Vec<u8>>) -> Bound<&[u8]> {
    match bound {
        Bound::Included(b) => Bound::Included(b.as_slice()),
        Bound::Excluded(b) => Bound::Excluded(b.as_slice()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    #[tracing::instrument(skip_all)]
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        // Writes reject oversized keys, so such a key can never be present.
        if key.len() > self.limits.max_key_size() {
            return Ok(None);
        }
        if self.is_expired(key) {
            return Ok(None);
        }
        Ok(self.data.read().get(key).cloned())
    }

    #[tracing::instrument(skip_all)]
    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        fail::fail_point!("memory-set", |_| {
            Err(StorageError::internal("injected failure on set"))
        });
        validate_sizes(&key, &value, &self.limits)?;

        let mut data = self.data.write();
        let mut deadlines = self.deadlines.write();
        deadlines.remove(&key);
        data.insert(key, Bytes::from(value));
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(ttl_secs = ttl.as_secs()))]
    async fn set_with_ttl(&self, key: Vec<u8>, value: Vec<u8>, ttl: Duration) -> StorageResult<()> {
        fail::fail_point!("memory-set", |_| {
            Err(StorageError::internal("injected failure on set"))
        });
        validate_sizes(&key, &value, &self.limits)?;

        let deadline = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| StorageError::internal("ttl overflows the clock"))?;

        let mut data = self.data.write();
        let mut deadlines = self.deadlines.write();
        deadlines.insert(key.clone(), deadline);
        data.insert(key, Bytes::from(value));
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn delete(&self, key: &[u8]) -> StorageResult<()> {
        fail::fail_point!("memory-delete", |_| {
            Err(StorageError::internal("injected failure on delete"))
        });
        if key.len() > self.limits.max_key_size() {
            return Ok(());
        }

        let mut data = self.data.write();
        let mut deadlines = self.deadlines.write();
        data.remove(key);
        deadlines.remove(key);
        Ok(())
    }

    #[tracing::instrument(skip_all)]
    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send,
    {
        let bounds = (to_slice_bound(range.start_bound()), to_slice_bound(range.end_bound()));
        let data = self.data.read();

        Ok(data
            .range::<[u8], _>(bounds)
            .filter(|(key, _)| !self.is_expired(key))
            .map(|(k, v)| KeyValue::new(Bytes::copy_from_slice(k), v.clone()))
            .collect())
    }

    #[tracing::instrument(skip_all)]
    async fn clear_range<R>(&self, range: R) -> StorageResult<()>
    where
        R: RangeBounds<Vec<u8>> + Send,
    {
        fail::fail_point!("memory-delete", |_| {
            Err(StorageError::internal("injected failure on clear_range"))
        });

        // Collect under a read lock, then remove under both write locks.
        let keys: Vec<Vec<u8>> = self.data.read().range(range).map(|(k, _)| k.clone()).collect();
        if keys.is_empty() {
            return Ok(());
        }

        let mut data = self.data.write();
        let mut deadlines = self.deadlines.write();
        for key in &keys {
            data.remove(key);
            deadlines.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::prefix_range;

    #[tokio::test]
    async fn test_basic_operations() {
        let backend = MemoryBackend::new();

        backend.set(b"key1".to_vec(), b"value1".to_vec()).await.unwrap();
        assert_eq!(backend.get(b"key1").await.unwrap(), Some(Bytes::from("value1")));

        backend.delete(b"key1").await.unwrap();
        assert_eq!(backend.get(b"key1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_noop() {
        let backend = MemoryBackend::new();
        backend.delete(b"never-written").await.unwrap();
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_prefix_scan_excludes_neighbours() {
        let backend = MemoryBackend::new();

        backend.set(b"devgate_access:1".to_vec(), b"a".to_vec()).await.unwrap();
        backend.set(b"devgate_access:2".to_vec(), b"b".to_vec()).await.unwrap();
        backend.set(b"devgate_access;".to_vec(), b"c".to_vec()).await.unwrap();
        backend.set(b"devgate_credential".to_vec(), b"d".to_vec()).await.unwrap();

        let range = backend.get_range(prefix_range(b"devgate_access:")).await.unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[0].key, Bytes::from("devgate_access:1"));
        assert_eq!(range[1].key, Bytes::from("devgate_access:2"));
    }

    #[tokio::test]
    async fn test_clear_range() {
        let backend = MemoryBackend::new();

        backend.set(b"a".to_vec(), b"1".to_vec()).await.unwrap();
        backend.set(b"b".to_vec(), b"2".to_vec()).await.unwrap();
        backend.set(b"c".to_vec(), b"3".to_vec()).await.unwrap();

        backend.clear_range(b"a".to_vec()..b"c".to_vec()).await.unwrap();

        assert_eq!(backend.get(b"a").await.unwrap(), None);
        assert_eq!(backend.get(b"b").await.unwrap(), None);
        assert_eq!(backend.get(b"c").await.unwrap(), Some(Bytes::from("3")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expires_on_read() {
        let backend = MemoryBackend::new();

        backend
            .set_with_ttl(b"temp".to_vec(), b"value".to_vec(), Duration::from_secs(30))
            .await
            .unwrap();
        assert!(backend.get(b"temp").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(backend.get(b"temp").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(backend.get(b"temp").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_is_immediately_expired() {
        let backend = MemoryBackend::new();
        backend.set_with_ttl(b"zero".to_vec(), b"v".to_vec(), Duration::ZERO).await.unwrap();
        assert_eq!(backend.get(b"zero").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_max_ttl_is_rejected_not_panicking() {
        let backend = MemoryBackend::new();
        let result = backend.set_with_ttl(b"k".to_vec(), b"v".to_vec(), Duration::MAX).await;
        assert!(matches!(result, Err(StorageError::Internal { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_clears_ttl() {
        let backend = MemoryBackend::new();

        backend
            .set_with_ttl(b"key".to_vec(), b"temp".to_vec(), Duration::from_secs(1))
            .await
            .unwrap();
        backend.set(b"key".to_vec(), b"permanent".to_vec()).await.unwrap();

        tokio::time::advance(Duration::from_secs(5)).await;

        assert_eq!(backend.get(b"key").await.unwrap(), Some(Bytes::from("permanent")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_with_ttl_replaces_deadline() {
        let backend = MemoryBackend::new();

        backend.set_with_ttl(b"k".to_vec(), b"1".to_vec(), Duration::from_secs(5)).await.unwrap();
        tokio::time::advance(Duration::from_secs(4)).await;
        backend.set_with_ttl(b"k".to_vec(), b"2".to_vec(), Duration::from_secs(5)).await.unwrap();
        tokio::time::advance(Duration::from_secs(4)).await;

        assert_eq!(backend.get(b"k").await.unwrap(), Some(Bytes::from("2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_reclaims_expired_keys() {
        let backend = MemoryBackend::new();

        backend
            .set_with_ttl(b"k".to_vec(), b"v".to_vec(), Duration::from_millis(10))
            .await
            .unwrap();
        backend.set(b"keep".to_vec(), b"v".to_vec()).await.unwrap();
        assert_eq!(backend.len(), 2);

        // Let the sweep task run past one interval.
        sleep(SWEEP_INTERVAL * 2).await;

        assert_eq!(backend.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_sweep() {
        let backend = MemoryBackend::new();

        backend
            .set_with_ttl(b"k".to_vec(), b"v".to_vec(), Duration::from_millis(10))
            .await
            .unwrap();
        backend.shutdown();
        sleep(SWEEP_INTERVAL * 3).await;

        // Still physically present, but invisible.
        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get(b"k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.shutdown();
        backend.shutdown();

        backend.set(b"key".to_vec(), b"value".to_vec()).await.unwrap();
        assert_eq!(backend.get(b"key").await.unwrap(), Some(Bytes::from("value")));
    }

    #[tokio::test]
    async fn test_clone_shares_data() {
        let backend1 = MemoryBackend::new();
        let backend2 = backend1.clone();

        backend1.set(b"key".to_vec(), b"value".to_vec()).await.unwrap();
        assert_eq!(backend2.get(b"key").await.unwrap(), Some(Bytes::from("value")));
    }

    #[tokio::test]
    async fn test_size_limits_enforced() {
        let backend = MemoryBackend::with_limits(SizeLimits::new(8, 8).unwrap());

        let err = backend.set(vec![b'k'; 9], b"v".to_vec()).await.unwrap_err();
        assert!(matches!(err, StorageError::SizeLimitExceeded { kind: "key", .. }));

        let err = backend.set(b"k".to_vec(), vec![0; 9]).await.unwrap_err();
        assert!(matches!(err, StorageError::SizeLimitExceeded { kind: "value", .. }));
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_key_reads_and_deletes_as_absent() {
        let backend = MemoryBackend::with_limits(SizeLimits::new(8, 8).unwrap());

        assert_eq!(backend.get(&[b'k'; 9]).await.unwrap(), None);
        backend.delete(&[b'k'; 9]).await.unwrap();
    }
}
