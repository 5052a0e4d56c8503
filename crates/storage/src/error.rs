//! Storage error types and result alias.
//!
//! Every [`StorageBackend`](crate::StorageBackend) maps its internal failures
//! onto [`StorageError`] so callers (the access gate in particular) can tell a
//! rejected write apart from a missing key without knowing which store is
//! plugged in.
//!
//! # Example
//!
//! ```
//! use devgate_storage::{StorageError, StorageResult};
//!
//! fn lookup(_key: &str) -> StorageResult<Option<Vec<u8>>> {
//!     Err(StorageError::connection("store unreachable"))
//! }
//! ```

use std::sync::Arc;

use thiserror::Error;

/// A boxed error type for source chain tracking.
pub type BoxError = Arc<dyn std::error::Error + Send + Sync>;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
///
/// Errors preserve their source chain via `#[source]`, so the full context is
/// available to whatever renders them.
///
/// # Non-exhaustive
///
/// New variants may be added in future minor releases. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// The store could not be reached.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
        /// The underlying error that caused this connection failure.
        #[source]
        source: Option<BoxError>,
    },

    /// Data could not be encoded for storage or decoded on the way out.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
        /// The underlying error that caused serialization to fail.
        #[source]
        source: Option<BoxError>,
    },

    /// Catch-all for backend-specific failures, including rejected writes.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
        /// The underlying error that caused this internal failure.
        #[source]
        source: Option<BoxError>,
    },

    /// A key or value exceeded the configured [`SizeLimits`](crate::SizeLimits).
    #[error("{kind} size {actual} exceeds limit of {limit} bytes")]
    SizeLimitExceeded {
        /// Whether the key or the value was too large.
        kind: &'static str,
        /// Observed size in bytes.
        actual: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

impl StorageError {
    /// Creates a new `Connection` error with the given message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection { message: message.into(), source: None }
    }

    /// Creates a new `Serialization` error with the given message.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into(), source: None }
    }

    /// Creates a new `Internal` error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), source: None }
    }

    /// Creates a new `Internal` error with a message and source error.
    #[must_use]
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal { message: message.into(), source: Some(Arc::new(source)) }
    }
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A numeric setting is below its allowed minimum.
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        /// Name of the offending field.
        field: &'static str,
        /// Smallest accepted value.
        min: String,
        /// Value that was supplied.
        value: String,
    },

    /// A string setting is empty.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A setting conflicts with another setting.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_source_chain_is_preserved() {
        let io = std::io::Error::other("disk full");
        let err = StorageError::internal_with_source("write rejected", io);

        assert_eq!(err.to_string(), "Internal error: write rejected");
        assert_eq!(err.source().map(ToString::to_string), Some("disk full".to_owned()));
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            StorageError::connection("refused").to_string(),
            "Connection error: refused"
        );
        assert_eq!(
            StorageError::serialization("bad utf-8").to_string(),
            "Serialization error: bad utf-8"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::BelowMinimum {
            field: "max_key_size",
            min: "1".into(),
            value: "0".into(),
        };
        assert_eq!(err.to_string(), "max_key_size must be at least 1, got 0");
        assert_eq!(
            ConfigError::Empty { field: "namespace" }.to_string(),
            "namespace must not be empty"
        );
    }
}
