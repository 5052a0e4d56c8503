//! Audit trail for gate operations.
//!
//! Every grant, verification attempt, revocation and credential change is
//! reported to an [`AuditLogger`] with who did it, what it touched, and
//! whether it worked. Secrets never appear in events.
//!
//! ```no_run
//! use devgate_authn::audit::{
//!     AuditAction, AuditEvent, AuditLogger, AuditResult, TracingAuditLogger,
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let event = AuditEvent::builder()
//!     .actor("42")
//!     .action(AuditAction::Verify)
//!     .resource("devgate_access:42")
//!     .result(AuditResult::Failure("authentication failed".into()))
//!     .build();
//! TracingAuditLogger.log(&event).await;
//! # });
//! ```

use std::{collections::BTreeMap, fmt, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Action performed through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// A grant was issued directly.
    Grant,
    /// A submitted secret was checked.
    Verify,
    /// A single grant was revoked.
    Revoke,
    /// Every grant in the namespace was revoked.
    RevokeAll,
    /// The credential was created or replaced.
    SetCredential,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grant => write!(f, "grant"),
            Self::Verify => write!(f, "verify"),
            Self::Revoke => write!(f, "revoke"),
            Self::RevokeAll => write!(f, "revoke_all"),
            Self::SetCredential => write!(f, "set_credential"),
        }
    }
}

/// Outcome of an audited operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditResult {
    /// Operation completed successfully.
    Success,
    /// Operation failed with the given reason.
    Failure(String),
}

impl fmt::Display for AuditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure(reason) => write!(f, "failure: {reason}"),
        }
    }
}

/// Structured audit event.
#[derive(Debug, Clone, bon::Builder)]
pub struct AuditEvent {
    /// When the event occurred (defaults to now).
    #[builder(default = Utc::now())]
    pub timestamp: DateTime<Utc>,
    /// Identity that performed the operation, or `"system"`.
    #[builder(into)]
    pub actor: String,
    /// The action that was performed.
    pub action: AuditAction,
    /// Store key affected (e.g. `"devgate_access:42"`).
    #[builder(into)]
    pub resource: String,
    /// Outcome of the operation.
    pub result: AuditResult,
    /// Additional context (e.g. grant expiry, revoked count).
    #[builder(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Trait for audit log backends.
#[async_trait]
pub trait AuditLogger: Send + Sync {
    /// Records an audit event.
    async fn log(&self, event: &AuditEvent);
}

#[async_trait]
impl<L: AuditLogger + ?Sized> AuditLogger for Arc<L> {
    async fn log(&self, event: &AuditEvent) {
        (**self).log(event).await;
    }
}

/// Audit logger that emits structured `tracing` events at `INFO`.
///
/// Field mapping:
/// - `audit.timestamp`: RFC 3339 timestamp
/// - `audit.actor`: who performed the action
/// - `audit.action`: e.g. `verify`
/// - `audit.resource`: store key affected
/// - `audit.result`: `success` or `failure: ...`
/// - `audit.metadata`: `k=v` pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLogger;

#[async_trait]
impl AuditLogger for TracingAuditLogger {
    async fn log(&self, event: &AuditEvent) {
        let metadata = event.metadata.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>();

        tracing::info!(
            audit.timestamp = %event.timestamp.to_rfc3339(),
            audit.actor = %event.actor,
            audit.action = %event.action,
            audit.resource = %event.resource,
            audit.result = %event.result,
            audit.metadata = %metadata.join(", "),
            "audit_event"
        );
    }
}

/// Audit logger that discards events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditLogger;

#[async_trait]
impl AuditLogger for NoopAuditLogger {
    async fn log(&self, _event: &AuditEvent) {}
}

/// Audit logger that keeps events in memory, for tests and diagnostics pages.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLogger {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl MemoryAuditLogger {
    /// Creates an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl AuditLogger for MemoryAuditLogger {
    async fn log(&self, event: &AuditEvent) {
        self.events.lock().push(event.clone());
    }
}
