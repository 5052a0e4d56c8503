//! The transient access gate.
//!
//! [`AccessGate`] decides whether a caller identity currently holds standing
//! access to a protected admin feature, and manages the shared credential
//! that unlocks it.
//!
//! Per identity the gate cycles through:
//!
//! ```text
//! NoCredentialSet ──setup──▶ CredentialSet { granted: false }
//!                                 │    ▲
//!                      verify/grant    expiry/revoke
//!                                 ▼    │
//!                            CredentialSet { granted: true }
//! ```
//!
//! Expiry is checked lazily against the injected [`Clock`] on every read;
//! nothing has to run for a grant to lapse.

use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};

use bytes::Bytes;
use devgate_storage::{ConfigError, StorageBackend, StorageError};
use tracing::{debug, warn};

use crate::{
    audit::{AuditAction, AuditEvent, AuditLogger, AuditResult, TracingAuditLogger},
    clock::{Clock, SystemClock},
    config::GateConfig,
    credential::Credential,
    error::{GateError, GateResult, ValidationError},
    grant::AccessGrant,
    metrics::GateMetrics,
    types::Identity,
};

/// Longest expiry hint passed to the store. Longer grants are stored without
/// one and rely on the clock check alone.
const MAX_STORE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Audit actor for operations not performed on behalf of an identity.
const SYSTEM_ACTOR: &str = "system";

/// Where an identity stands with respect to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No credential is stored; only setup is possible.
    NoCredentialSet,
    /// A credential is stored.
    CredentialSet {
        /// Whether the identity holds a valid grant.
        granted: bool,
    },
}

/// Credential-gated, time-boxed access for admin tooling.
///
/// The gate owns no state of its own: grants and the credential live in the
/// injected [`StorageBackend`], so any number of gates over the same store
/// agree. Concurrent writes to one identity's grant are last-writer-wins.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use devgate_authn::{AccessGate, GateConfig, Identity};
/// use devgate_storage::MemoryBackend;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let gate = AccessGate::new(MemoryBackend::new(), GateConfig::default())?;
/// let user = Identity::from(42_u64);
///
/// gate.setup_credential("correct horse").await?;
/// assert!(!gate.has_access(&user).await);
///
/// gate.verify(&user, "correct horse").await?;
/// assert!(gate.has_access(&user).await);
///
/// gate.revoke_access(&user).await?;
/// assert!(!gate.has_access(&user).await);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AccessGate<B, C = SystemClock> {
    backend: B,
    config: GateConfig,
    clock: C,
    audit: Arc<dyn AuditLogger>,
    metrics: GateMetrics,
}

impl<B, C> fmt::Debug for AccessGate<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate").field("config", &self.config).finish_non_exhaustive()
    }
}

impl<B: StorageBackend> AccessGate<B> {
    /// Creates a gate on the system clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` does not validate.
    pub fn new(backend: B, config: GateConfig) -> Result<Self, ConfigError> {
        Self::with_clock(backend, config, SystemClock)
    }
}

impl<B: StorageBackend, C: Clock> AccessGate<B, C> {
    /// Creates a gate reading time from `clock`.
    ///
    /// Audit events go to a [`TracingAuditLogger`] until replaced with
    /// [`with_audit_logger`](Self::with_audit_logger).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` does not validate.
    pub fn with_clock(backend: B, config: GateConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            backend,
            config,
            clock,
            audit: Arc::new(TracingAuditLogger),
            metrics: GateMetrics::new(),
        })
    }

    /// Replaces the audit logger.
    #[must_use]
    pub fn with_audit_logger(mut self, logger: impl AuditLogger + 'static) -> Self {
        self.audit = Arc::new(logger);
        self
    }

    /// Records into `metrics` instead of a private set of counters.
    #[must_use]
    pub fn with_metrics(mut self, metrics: GateMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The gate's configuration.
    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// The gate's counters.
    #[must_use]
    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }

    /// The underlying store.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns `true` if `identity` holds a grant that has not lapsed.
    ///
    /// Never errors: a store or decode failure is logged and treated as no
    /// access. Use [`grant`](Self::grant) to see the failure.
    #[tracing::instrument(skip_all, fields(identity = %identity))]
    pub async fn has_access(&self, identity: &Identity) -> bool {
        match self.grant(identity).await {
            Ok(grant) => grant.is_some(),
            Err(error) => {
                warn!(%error, "grant lookup failed, denying access");
                false
            },
        }
    }

    /// Returns `identity`'s grant if it is still valid.
    ///
    /// # Errors
    ///
    /// - [`GateError::Storage`] if the store read fails.
    /// - [`GateError::Serialization`] if the stored grant is malformed.
    #[tracing::instrument(skip_all, fields(identity = %identity))]
    pub async fn grant(&self, identity: &Identity) -> GateResult<Option<AccessGrant>> {
        let key = self.config.grant_key(identity);
        let Some(bytes) = self.read("grant", &key).await? else {
            return Ok(None);
        };
        let grant = AccessGrant::from_bytes(&bytes)?;
        Ok(grant.is_valid_at(self.clock.now()).then_some(grant))
    }

    /// Issues `identity` a grant lasting `ttl`, replacing any existing one.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ZeroTtl`] if `ttl` is zero.
    /// - [`GateError::StoreWrite`] if the grant could not be persisted; the
    ///   previous grant, if any, is left as it was.
    #[tracing::instrument(skip_all, fields(identity = %identity, ttl_secs = ttl.as_secs()))]
    pub async fn grant_transient_access(
        &self,
        identity: &Identity,
        ttl: Duration,
    ) -> GateResult<AccessGrant> {
        if ttl.is_zero() {
            return Err(ValidationError::ZeroTtl.into());
        }

        let key = self.config.grant_key(identity);
        let grant = AccessGrant::issue(identity.clone(), self.clock.now(), ttl);
        let result = self.persist_grant(key.clone(), &grant, ttl).await;

        let mut metadata = BTreeMap::new();
        metadata.insert("expires_at".to_owned(), grant.expires_at.to_rfc3339());
        self.record(identity.as_str(), AuditAction::Grant, &key, outcome(&result), metadata).await;

        result.map(|()| grant)
    }

    /// Issues `identity` a grant lasting the configured default TTL.
    ///
    /// # Errors
    ///
    /// See [`grant_transient_access`](Self::grant_transient_access).
    pub async fn grant_default(&self, identity: &Identity) -> GateResult<AccessGrant> {
        self.grant_transient_access(identity, self.config.default_ttl()).await
    }

    /// Compares `submitted` against `stored` in constant time and, on a
    /// match, grants `identity` access for `ttl`.
    ///
    /// Returns `Ok(false)` without touching the store on a mismatch. An empty
    /// `stored` secret never matches, and the result does not say which of
    /// the two happened.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ZeroTtl`] if `ttl` is zero; nothing is compared.
    /// - [`GateError::StoreWrite`] if the secret matched but the grant could
    ///   not be persisted.
    #[tracing::instrument(skip_all, fields(identity = %identity))]
    pub async fn verify_and_grant(
        &self,
        identity: &Identity,
        submitted: &str,
        stored: &Credential,
        ttl: Duration,
    ) -> GateResult<bool> {
        if ttl.is_zero() {
            return Err(ValidationError::ZeroTtl.into());
        }
        if !self.check_secret(identity, Some(stored), submitted).await {
            return Ok(false);
        }
        self.grant_transient_access(identity, ttl).await?;
        Ok(true)
    }

    /// Verifies `submitted` against the stored credential and grants
    /// `identity` access for the default TTL.
    ///
    /// # Errors
    ///
    /// - [`GateError::AuthenticationFailed`] if the secret is wrong or no
    ///   credential is configured.
    /// - [`GateError::Storage`] if the credential could not be read.
    /// - [`GateError::StoreWrite`] if the grant could not be persisted.
    #[tracing::instrument(skip_all, fields(identity = %identity))]
    pub async fn verify(&self, identity: &Identity, submitted: &str) -> GateResult<AccessGrant> {
        let stored = self.stored_credential().await?;
        if !self.check_secret(identity, stored.as_ref(), submitted).await {
            return Err(GateError::AuthenticationFailed);
        }
        self.grant_default(identity).await
    }

    /// Removes `identity`'s grant. Revoking an absent grant succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::StoreWrite`] if the store rejects the delete.
    #[tracing::instrument(skip_all, fields(identity = %identity))]
    pub async fn revoke_access(&self, identity: &Identity) -> GateResult<()> {
        let key = self.config.grant_key(identity);
        let result = self.remove("grant", &key).await;
        if result.is_ok() {
            self.metrics.record_revocation();
        }
        self.record(identity.as_str(), AuditAction::Revoke, &key, outcome(&result), BTreeMap::new())
            .await;
        result
    }

    /// Removes every grant in the namespace and returns how many were
    /// still valid.
    ///
    /// # Errors
    ///
    /// - [`GateError::Storage`] if the namespace scan fails.
    /// - [`GateError::StoreWrite`] if the store rejects the bulk delete.
    #[tracing::instrument(skip_all)]
    pub async fn revoke_all(&self) -> GateResult<usize> {
        let prefix = self.config.grant_prefix();
        let result = self.clear_grants().await;
        if result.is_ok() {
            self.metrics.record_revocation();
        }

        let mut metadata = BTreeMap::new();
        if let Ok(active) = &result {
            metadata.insert("active".to_owned(), active.to_string());
        }
        self.record(SYSTEM_ACTOR, AuditAction::RevokeAll, &prefix, outcome(&result), metadata)
            .await;
        result
    }

    /// Lists every valid grant in the namespace, ordered by store key.
    ///
    /// Malformed records are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Storage`] if the namespace scan fails.
    #[tracing::instrument(skip_all)]
    pub async fn active_grants(&self) -> GateResult<Vec<AccessGrant>> {
        let now = self.clock.now();
        Ok(self.scan_grants().await?.into_iter().filter(|g| g.is_valid_at(now)).collect())
    }

    /// Validates and stores a new credential, replacing any existing one.
    ///
    /// Existing grants are kept.
    ///
    /// # Errors
    ///
    /// - [`GateError::Validation`] if the secret is empty or shorter than
    ///   the configured minimum; nothing is persisted.
    /// - [`GateError::StoreWrite`] if the store rejects the write.
    #[tracing::instrument(skip_all)]
    pub async fn set_credential(&self, new: impl Into<Credential>) -> GateResult<()> {
        self.write_credential(SYSTEM_ACTOR, new.into()).await
    }

    /// First-time setup: stores the credential only if none exists yet.
    ///
    /// # Errors
    ///
    /// - [`GateError::AlreadyConfigured`] if a credential is stored.
    /// - Otherwise as [`set_credential`](Self::set_credential).
    #[tracing::instrument(skip_all)]
    pub async fn setup_credential(&self, new: impl Into<Credential>) -> GateResult<()> {
        if self.credential_configured().await? {
            let key = self.config.credential_key().as_bytes();
            let result = AuditResult::Failure(GateError::AlreadyConfigured.to_string());
            self.record(SYSTEM_ACTOR, AuditAction::SetCredential, key, result, BTreeMap::new())
                .await;
            return Err(GateError::AlreadyConfigured);
        }
        self.write_credential(SYSTEM_ACTOR, new.into()).await
    }

    /// Replaces the credential on behalf of `identity`, who must hold a
    /// valid grant.
    ///
    /// # Errors
    ///
    /// - [`GateError::AuthenticationFailed`] if `identity` has no valid grant.
    /// - Otherwise as [`set_credential`](Self::set_credential).
    #[tracing::instrument(skip_all, fields(identity = %identity))]
    pub async fn replace_credential(
        &self,
        identity: &Identity,
        new: impl Into<Credential>,
    ) -> GateResult<()> {
        if self.grant(identity).await?.is_none() {
            let key = self.config.credential_key().as_bytes();
            let result = AuditResult::Failure(GateError::AuthenticationFailed.to_string());
            self.record(identity.as_str(), AuditAction::SetCredential, key, result, BTreeMap::new())
                .await;
            return Err(GateError::AuthenticationFailed);
        }
        self.write_credential(identity.as_str(), new.into()).await
    }

    /// Returns the stored credential, or `None` if it is absent or empty.
    ///
    /// # Errors
    ///
    /// - [`GateError::Storage`] if the store read fails.
    /// - [`GateError::Serialization`] if the stored value is not UTF-8.
    pub async fn stored_credential(&self) -> GateResult<Option<Credential>> {
        let key = self.config.credential_key().as_bytes();
        let Some(bytes) = self.read("credential", key).await? else {
            return Ok(None);
        };
        let secret = std::str::from_utf8(&bytes)
            .map_err(|e| GateError::Serialization { message: e.to_string() })?;
        let credential = Credential::new(secret);
        Ok((!credential.is_empty()).then_some(credential))
    }

    /// Returns `true` if a non-empty credential is stored.
    ///
    /// # Errors
    ///
    /// See [`stored_credential`](Self::stored_credential).
    pub async fn credential_configured(&self) -> GateResult<bool> {
        Ok(self.stored_credential().await?.is_some())
    }

    /// Returns where `identity` stands.
    ///
    /// # Errors
    ///
    /// See [`stored_credential`](Self::stored_credential) and
    /// [`grant`](Self::grant).
    #[tracing::instrument(skip_all, fields(identity = %identity))]
    pub async fn state(&self, identity: &Identity) -> GateResult<GateState> {
        if !self.credential_configured().await? {
            return Ok(GateState::NoCredentialSet);
        }
        let granted = self.grant(identity).await?.is_some();
        Ok(GateState::CredentialSet { granted })
    }

    async fn check_secret(
        &self,
        identity: &Identity,
        stored: Option<&Credential>,
        submitted: &str,
    ) -> bool {
        let matched = stored.is_some_and(|credential| credential.matches(submitted));
        self.metrics.record_verify(matched);

        let result = if matched {
            AuditResult::Success
        } else {
            debug!("submitted secret rejected");
            AuditResult::Failure(GateError::AuthenticationFailed.to_string())
        };
        let key = self.config.grant_key(identity);
        self.record(identity.as_str(), AuditAction::Verify, &key, result, BTreeMap::new()).await;
        matched
    }

    async fn persist_grant(
        &self,
        key: Vec<u8>,
        grant: &AccessGrant,
        ttl: Duration,
    ) -> GateResult<()> {
        let value = grant.to_bytes()?;
        // The store may reclaim the record only after the grant has lapsed.
        let whole_secs = ttl.as_secs().saturating_add(u64::from(ttl.subsec_nanos() > 0));
        let hint = Duration::from_secs(whole_secs);
        let stored = if hint <= MAX_STORE_TTL {
            self.backend.set_with_ttl(key, value, hint).await
        } else {
            self.backend.set(key, value).await
        };
        stored.map_err(|e| self.write_failed("grant", e))?;

        self.metrics.record_grant();
        debug!(expires_at = %grant.expires_at, "grant persisted");
        Ok(())
    }

    async fn write_credential(&self, actor: &str, credential: Credential) -> GateResult<()> {
        let key = self.config.credential_key().as_bytes();
        let result = self.store_credential(key, &credential).await;
        if result.is_ok() {
            self.metrics.record_credential_update();
        }
        self.record(actor, AuditAction::SetCredential, key, outcome(&result), BTreeMap::new())
            .await;
        result
    }

    async fn store_credential(&self, key: &[u8], credential: &Credential) -> GateResult<()> {
        credential.validate(self.config.min_credential_length())?;
        self.backend
            .set(key.to_vec(), credential.expose().as_bytes().to_vec())
            .await
            .map_err(|e| self.write_failed("credential", e))
    }

    async fn scan_grants(&self) -> GateResult<Vec<AccessGrant>> {
        let entries = self
            .backend
            .get_range(self.config.grant_range())
            .await
            .map_err(|e| self.read_failed("grants", e))?;

        Ok(entries
            .iter()
            .filter_map(|entry| match AccessGrant::from_bytes(&entry.value) {
                Ok(grant) => Some(grant),
                Err(error) => {
                    let key = String::from_utf8_lossy(&entry.key);
                    warn!(key = %key, %error, "skipping malformed grant");
                    None
                },
            })
            .collect())
    }

    async fn clear_grants(&self) -> GateResult<usize> {
        let now = self.clock.now();
        let active = self.scan_grants().await?.iter().filter(|g| g.is_valid_at(now)).count();
        self.backend
            .clear_range(self.config.grant_range())
            .await
            .map_err(|e| self.write_failed("grants", e))?;
        Ok(active)
    }

    async fn read(&self, what: &'static str, key: &[u8]) -> GateResult<Option<Bytes>> {
        self.backend.get(key).await.map_err(|e| self.read_failed(what, e))
    }

    async fn remove(&self, what: &'static str, key: &[u8]) -> GateResult<()> {
        self.backend.delete(key).await.map_err(|e| self.write_failed(what, e))
    }

    fn read_failed(&self, what: &'static str, source: StorageError) -> GateError {
        self.metrics.record_store_failure();
        warn!(what, error = %source, "store read failed");
        GateError::storage(what, source)
    }

    fn write_failed(&self, what: &'static str, source: StorageError) -> GateError {
        self.metrics.record_store_failure();
        warn!(what, error = %source, "store write failed");
        GateError::store_write(what, source)
    }

    async fn record(
        &self,
        actor: &str,
        action: AuditAction,
        resource: &[u8],
        result: AuditResult,
        metadata: BTreeMap<String, String>,
    ) {
        let event = AuditEvent::builder()
            .timestamp(self.clock.now())
            .actor(actor)
            .action(action)
            .resource(String::from_utf8_lossy(resource))
            .result(result)
            .metadata(metadata)
            .build();
        self.audit.log(&event).await;
    }
}

fn outcome<T>(result: &GateResult<T>) -> AuditResult {
    match result {
        Ok(_) => AuditResult::Success,
        Err(e) => AuditResult::Failure(e.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use chrono::DateTime;
    use devgate_storage::MemoryBackend;

    use super::*;
    use crate::{
        audit::MemoryAuditLogger,
        clock::ManualClock,
        testutil::{TestGate, gate_with_clock},
    };

    fn gate() -> (AccessGate<MemoryBackend, ManualClock>, ManualClock, MemoryAuditLogger) {
        let TestGate { gate, clock, audit } = gate_with_clock();
        (gate, clock, audit)
    }

    #[tokio::test]
    async fn test_grant_is_overwritten_not_appended() {
        let (gate, clock, _) = gate();
        let id = Identity::from(1_u64);

        gate.grant_transient_access(&id, Duration::from_secs(60)).await.unwrap();
        clock.advance(Duration::from_secs(30));
        let second = gate.grant_transient_access(&id, Duration::from_secs(60)).await.unwrap();

        assert_eq!(gate.grant(&id).await.unwrap(), Some(second));
        assert_eq!(gate.active_grants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_is_rejected_before_any_write() {
        let (gate, _, audit) = gate();
        let id = Identity::from(1_u64);

        let err = gate.grant_transient_access(&id, Duration::ZERO).await.unwrap_err();

        assert!(matches!(err, GateError::Validation(ValidationError::ZeroTtl)));
        assert!(gate.backend().is_empty());
        assert!(audit.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_millisecond_grant_outlives_its_store_hint() {
        let (gate, clock, _) = gate();
        let id = Identity::from(1_u64);
        clock.set(DateTime::from_timestamp(10, 123_900_000).unwrap());

        gate.grant_transient_access(&id, Duration::from_micros(500)).await.unwrap();
        assert!(gate.has_access(&id).await);

        tokio::time::advance(Duration::from_millis(900)).await;
        assert!(gate.has_access(&id).await, "store kept the record");

        clock.advance(Duration::from_millis(1));
        assert!(!gate.has_access(&id).await);
    }

    #[tokio::test]
    async fn test_grant_beyond_store_hint_is_still_checked_by_clock() {
        let (gate, clock, _) = gate();
        let id = Identity::from(1_u64);
        let ttl = MAX_STORE_TTL + Duration::from_secs(60);

        gate.grant_transient_access(&id, ttl).await.unwrap();
        assert!(gate.has_access(&id).await);

        clock.advance(ttl);
        assert!(!gate.has_access(&id).await);
    }

    #[tokio::test]
    async fn test_malformed_grant_fails_closed() {
        let (gate, _, _) = gate();
        let id = Identity::from(1_u64);
        let key = gate.config().grant_key(&id);
        gate.backend().set(key, b"{not json".to_vec()).await.unwrap();

        assert!(!gate.has_access(&id).await);
        assert!(matches!(gate.grant(&id).await, Err(GateError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_verify_and_grant_mismatch_has_no_side_effect() {
        let (gate, _, audit) = gate();
        let id = Identity::from(1_u64);
        let stored = Credential::from("correct");

        let granted = gate
            .verify_and_grant(&id, "wrong", &stored, Duration::from_secs(1800))
            .await
            .unwrap();

        assert!(!granted);
        assert!(gate.backend().is_empty());
        assert_eq!(gate.metrics().snapshot().verify_failures, 1);
        let events = audit.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, AuditAction::Verify);
        assert!(matches!(events[0].result, AuditResult::Failure(_)));
    }

    #[tokio::test]
    async fn test_audit_never_contains_the_secret() {
        let (gate, _, audit) = gate();
        let id = Identity::from(1_u64);

        gate.setup_credential("hunter22").await.unwrap();
        gate.verify(&id, "hunter22").await.unwrap();
        gate.verify(&id, "hunter23").await.unwrap_err();

        for event in audit.events() {
            let rendered = format!("{event:?}");
            assert!(!rendered.contains("hunter2"), "secret leaked into {rendered}");
        }
    }

    #[tokio::test]
    async fn test_empty_stored_credential_counts_as_unconfigured() {
        let (gate, _, _) = gate();
        let key = gate.config().credential_key().as_bytes().to_vec();
        gate.backend().set(key, Vec::new()).await.unwrap();

        assert!(!gate.credential_configured().await.unwrap());
        assert_eq!(gate.state(&Identity::from(1_u64)).await.unwrap(), GateState::NoCredentialSet);
        gate.setup_credential("abcdef").await.unwrap();
    }

    #[tokio::test]
    async fn test_non_utf8_credential_is_a_serialization_error() {
        let (gate, _, _) = gate();
        let key = gate.config().credential_key().as_bytes().to_vec();
        gate.backend().set(key, vec![0xff, 0xfe]).await.unwrap();

        let err = gate.verify(&Identity::from(1_u64), "anything").await.unwrap_err();
        assert!(matches!(err, GateError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config: GateConfig = serde_json::from_str(r#"{ "namespace": "" }"#).unwrap();
        let result = AccessGate::new(MemoryBackend::new(), config);
        assert!(matches!(result, Err(ConfigError::Empty { field: "namespace" })));
    }

    #[tokio::test]
    async fn test_debug_does_not_print_backend() {
        let (gate, _, _) = gate();
        let rendered = format!("{gate:?}");
        assert!(rendered.starts_with("AccessGate"));
        assert!(rendered.contains("devgate_access"));
    }
}
