//! # Devgate Authentication
//!
//! Credential-gated, time-boxed access for sensitive admin tooling.
//!
//! This crate provides:
//! - **Access gate**: issue, check and revoke per-identity grants
//! - **Credential management**: one shared secret, validated and compared in constant time
//! - **Audit trail**: structured events for every grant, verification and credential change
//!
//! ## Features
//!
//! - Grants expire lazily against an injected [`Clock`]; no sweeper is required
//! - Wrong secret and missing credential are indistinguishable to callers
//! - Store failures are returned as values, never retried or swallowed
//!
//! ## Example
//!
//! ```no_run
//! use devgate_authn::{AccessGate, GateConfig, GateError, Identity};
//! use devgate_storage::MemoryBackend;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gate = AccessGate::new(MemoryBackend::new(), GateConfig::default())?;
//! let caller = Identity::from(42_u64);
//!
//! if !gate.has_access(&caller).await {
//!     match gate.verify(&caller, "submitted secret").await {
//!         Ok(grant) => println!("access until {}", grant.expires_at),
//!         Err(GateError::AuthenticationFailed) => println!("wrong password"),
//!         Err(other) => return Err(other.into()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Audit events and loggers.
pub mod audit;
/// Time sources.
pub mod clock;
/// Gate configuration.
pub mod config;
/// The shared secret.
pub mod credential;
/// Gate error types.
pub mod error;
/// The access gate.
pub mod gate;
/// Access grants.
pub mod grant;
/// Gate counters.
pub mod metrics;
#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
/// Identity type.
pub mod types;

// Re-export key types for convenience
pub use audit::{AuditLogger, NoopAuditLogger, TracingAuditLogger};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DEFAULT_CREDENTIAL_KEY, DEFAULT_GRANT_TTL, DEFAULT_NAMESPACE, GateConfig};
pub use credential::{Credential, DEFAULT_MIN_CREDENTIAL_LENGTH};
pub use error::{GateError, GateResult, ValidationError};
pub use gate::{AccessGate, GateState};
pub use grant::AccessGrant;
pub use metrics::{GateMetrics, GateMetricsSnapshot};
pub use types::Identity;
