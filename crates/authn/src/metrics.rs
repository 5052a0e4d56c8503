//! Counters for gate activity.
//!
//! All counters use `Ordering::Relaxed`: each one is independent and
//! monotonic, and a snapshot may be slightly skewed between counters.
//!
//! ```
//! use devgate_authn::metrics::GateMetrics;
//!
//! let metrics = GateMetrics::new();
//! metrics.record_verify(false);
//! metrics.record_verify(true);
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.verify_failures, 1);
//! assert_eq!(snapshot.verify_successes, 1);
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Point-in-time copy of [`GateMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateMetricsSnapshot {
    /// Grants written to the store.
    pub grants_issued: u64,
    /// Verifications where the secret matched.
    pub verify_successes: u64,
    /// Verifications where the secret did not match or none was configured.
    pub verify_failures: u64,
    /// Successful `revoke_access` and `revoke_all` calls.
    pub revocations: u64,
    /// Credential writes.
    pub credential_updates: u64,
    /// Operations that failed because the store did.
    pub store_failures: u64,
}

impl GateMetricsSnapshot {
    /// Fraction of verifications that failed, or `0.0` if there were none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn verify_failure_rate(&self) -> f64 {
        let total = self.verify_successes + self.verify_failures;
        if total == 0 {
            return 0.0;
        }
        self.verify_failures as f64 / total as f64
    }
}

#[derive(Debug, Default)]
struct Counters {
    grants_issued: AtomicU64,
    verify_successes: AtomicU64,
    verify_failures: AtomicU64,
    revocations: AtomicU64,
    credential_updates: AtomicU64,
    store_failures: AtomicU64,
}

/// Shared gate counters. Clones share the same counts.
#[derive(Debug, Clone, Default)]
pub struct GateMetrics {
    inner: Arc<Counters>,
}

impl GateMetrics {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a persisted grant.
    pub fn record_grant(&self) {
        self.inner.grants_issued.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a verification outcome.
    pub fn record_verify(&self, matched: bool) {
        let counter =
            if matched { &self.inner.verify_successes } else { &self.inner.verify_failures };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed revocation.
    pub fn record_revocation(&self) {
        self.inner.revocations.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a credential write.
    pub fn record_credential_update(&self) {
        self.inner.credential_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a failed store call.
    pub fn record_store_failure(&self) {
        self.inner.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current counts.
    #[must_use]
    pub fn snapshot(&self) -> GateMetricsSnapshot {
        let c = &self.inner;
        GateMetricsSnapshot {
            grants_issued: c.grants_issued.load(Ordering::Relaxed),
            verify_successes: c.verify_successes.load(Ordering::Relaxed),
            verify_failures: c.verify_failures.load(Ordering::Relaxed),
            revocations: c.revocations.load(Ordering::Relaxed),
            credential_updates: c.credential_updates.load(Ordering::Relaxed),
            store_failures: c.store_failures.load(Ordering::Relaxed),
        }
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        let c = &self.inner;
        for counter in [
            &c.grants_issued,
            &c.verify_successes,
            &c.verify_failures,
            &c.revocations,
            &c.credential_updates,
            &c.store_failures,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
