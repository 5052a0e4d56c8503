//! Access gate error types.
//!
//! All failures are returned as values; the gate never renders messages. The
//! UI layer decides how each kind is shown to the user.

use devgate_storage::StorageError;
use thiserror::Error;

/// Result type alias for gate operations.
pub type GateResult<T> = std::result::Result<T, GateError>;

/// Rejected input to a gate operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The credential is empty.
    #[error("credential must not be empty")]
    Empty,

    /// The credential is shorter than the configured minimum.
    #[error("credential must be at least {min} characters, got {actual}")]
    TooShort {
        /// Configured minimum length in characters.
        min: usize,
        /// Length of the rejected credential in characters.
        actual: usize,
    },

    /// A grant was requested with a zero time-to-live.
    #[error("grant ttl must be greater than zero")]
    ZeroTtl,
}

/// Errors returned by [`AccessGate`](crate::AccessGate) operations.
///
/// # Non-exhaustive
///
/// New variants may be added in future minor releases. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GateError {
    /// Input failed validation; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected a write. The operation had no effect and is not
    /// retried.
    #[error("failed to persist {what}")]
    StoreWrite {
        /// What was being written (`"grant"`, `"credential"`, ...).
        what: &'static str,
        /// The store's error.
        #[source]
        source: StorageError,
    },

    /// The store failed while reading.
    #[error("failed to read {what}")]
    Storage {
        /// What was being read.
        what: &'static str,
        /// The store's error.
        #[source]
        source: StorageError,
    },

    /// A stored record could not be encoded or decoded.
    #[error("malformed stored record: {message}")]
    Serialization {
        /// Description of the decoding failure.
        message: String,
    },

    /// The submitted secret did not match, or no credential is configured.
    ///
    /// The two causes are deliberately indistinguishable.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Setup was attempted while a credential already exists.
    #[error("a credential is already configured")]
    AlreadyConfigured,
}

impl GateError {
    pub(crate) fn store_write(what: &'static str, source: StorageError) -> Self {
        Self::StoreWrite { what, source }
    }

    pub(crate) fn storage(what: &'static str, source: StorageError) -> Self {
        Self::Storage { what, source }
    }

    /// Returns `true` for failures caused by the store rather than the caller.
    #[must_use]
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::StoreWrite { .. } | Self::Storage { .. })
    }
}
