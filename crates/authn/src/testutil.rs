//! Shared test utilities for code built on [`AccessGate`].
//!
//! Feature-gated behind `testutil` so it never leaks into production builds.
//!
//! ```toml
//! [dev-dependencies]
//! devgate-authn = { path = "../authn", features = ["testutil"] }
//! ```
//!
//! Every helper wires the gate to a [`ManualClock`] and a
//! [`MemoryAuditLogger`], so tests can move time and inspect the audit trail.

#![allow(clippy::expect_used)]

use devgate_storage::{MemoryBackend, StorageBackend, testutil::FlakyBackend};

use crate::{AccessGate, GateConfig, audit::MemoryAuditLogger, clock::ManualClock};

/// A gate plus the handles a test needs to drive it.
#[derive(Clone)]
pub struct TestGate<B = MemoryBackend> {
    /// The gate under test.
    pub gate: AccessGate<B, ManualClock>,
    /// Shares time with the gate.
    pub clock: ManualClock,
    /// Receives every audit event the gate emits.
    pub audit: MemoryAuditLogger,
}

/// Builds a gate over a fresh [`MemoryBackend`] with the default config.
///
/// Must be called from within a tokio runtime.
///
/// # Panics
///
/// Never in practice; the default config always validates.
#[must_use]
pub fn gate_with_clock() -> TestGate {
    gate_over(MemoryBackend::new(), GateConfig::default())
}

/// Builds a gate over a [`FlakyBackend`] and returns a handle to its write
/// switch.
///
/// # Panics
///
/// Never in practice; the default config always validates.
#[must_use]
pub fn flaky_gate() -> (TestGate<FlakyBackend>, FlakyBackend) {
    let backend = FlakyBackend::new(MemoryBackend::new());
    (gate_over(backend.clone(), GateConfig::default()), backend)
}

/// Builds a gate over `backend` with `config`.
///
/// # Panics
///
/// Panics if `config` does not validate.
pub fn gate_over<B: StorageBackend>(backend: B, config: GateConfig) -> TestGate<B> {
    let clock = ManualClock::new();
    let audit = MemoryAuditLogger::new();
    let gate = AccessGate::with_clock(backend, config, clock.clone())
        .expect("test gate config must validate")
        .with_audit_logger(audit.clone());
    TestGate { gate, clock, audit }
}

/// Builds a gate whose credential is already set to `secret`.
///
/// # Panics
///
/// Panics if `secret` is shorter than the default minimum.
pub async fn configured_gate(secret: &str) -> TestGate {
    let test = gate_with_clock();
    test.gate.setup_credential(secret).await.expect("failed to set up test credential");
    test
}
