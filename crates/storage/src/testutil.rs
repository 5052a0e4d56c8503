//! Shared test utilities for code built on [`StorageBackend`].
//!
//! Feature-gated behind `testutil` so it never leaks into production builds.
//!
//! ```toml
//! [dev-dependencies]
//! devgate-storage = { path = "../storage", features = ["testutil"] }
//! ```

use std::{
    ops::RangeBounds,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    StorageBackend,
    error::{StorageError, StorageResult},
    memory::MemoryBackend,
    types::KeyValue,
};

/// A [`MemoryBackend`] wrapper whose writes can be switched to fail.
///
/// While rejecting, every `set`, `set_with_ttl`, `delete` and `clear_range`
/// returns [`StorageError::Internal`] without touching the inner data. Reads
/// always pass through. Clones share the switch and the counters.
#[derive(Clone)]
pub struct FlakyBackend {
    inner: MemoryBackend,
    reject_writes: Arc<AtomicBool>,
    rejected: Arc<AtomicUsize>,
}

impl FlakyBackend {
    /// Wraps `inner`, initially accepting writes.
    #[must_use]
    pub fn new(inner: MemoryBackend) -> Self {
        Self {
            inner,
            reject_writes: Arc::new(AtomicBool::new(false)),
            rejected: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Starts or stops rejecting writes.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Number of writes rejected so far.
    #[must_use]
    pub fn rejected_writes(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }

    /// The wrapped backend, for inspecting state behind the wrapper.
    #[must_use]
    pub fn inner(&self) -> &MemoryBackend {
        &self.inner
    }

    fn check_write(&self, op: &str) -> StorageResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(StorageError::internal(format!("simulated {op} rejection")));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FlakyBackend {
    async fn get(&self, key: &[u8]) -> StorageResult<Option<Bytes>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: Vec<u8>, value: Vec<u8>) -> StorageResult<()> {
        self.check_write("set")?;
        self.inner.set(key, value).await
    }

    async fn set_with_ttl(&self, key: Vec<u8>, value: Vec<u8>, ttl: Duration) -> StorageResult<()> {
        self.check_write("set_with_ttl")?;
        self.inner.set_with_ttl(key, value, ttl).await
    }

    async fn delete(&self, key: &[u8]) -> StorageResult<()> {
        self.check_write("delete")?;
        self.inner.delete(key).await
    }

    async fn get_range<R>(&self, range: R) -> StorageResult<Vec<KeyValue>>
    where
        R: RangeBounds<Vec<u8>> + Send,
    {
        self.inner.get_range(range).await
    }

    async fn clear_range<R>(&self, range: R) -> StorageResult<()>
    where
        R: RangeBounds<Vec<u8>> + Send,
    {
        self.check_write("clear_range")?;
        self.inner.clear_range(range).await
    }
}
