//! Key and value size validation.
//!
//! Options-style stores usually cap key length (the host's settings table
//! has a fixed-width name column) and reject oversized blobs. [`MemoryBackend`]
//! enforces the same limits so that an identity long enough to overflow a
//! real store's key column fails in tests too.
//!
//! | Limit | Default |
//! |-------|---------|
//! | `max_key_size` | 191 bytes |
//! | `max_value_size` | 65 535 bytes |
//!
//! [`MemoryBackend`]: crate::MemoryBackend

use crate::{ConfigError, StorageError};

/// Default maximum key size in bytes.
pub const DEFAULT_MAX_KEY_SIZE: usize = 191;

/// Default maximum value size in bytes.
pub const DEFAULT_MAX_VALUE_SIZE: usize = 65_535;

/// Configurable size limits for keys and values.
///
/// # Example
///
/// ```
/// use devgate_storage::SizeLimits;
///
/// let limits = SizeLimits::new(64, 4096).unwrap();
/// assert_eq!(limits.max_key_size(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    max_key_size: usize,
    max_value_size: usize,
}

impl SizeLimits {
    /// Creates size limits with the given bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BelowMinimum`] if either limit is zero.
    pub fn new(max_key_size: usize, max_value_size: usize) -> Result<Self, ConfigError> {
        for (field, value) in [("max_key_size", max_key_size), ("max_value_size", max_value_size)] {
            if value == 0 {
                return Err(ConfigError::BelowMinimum {
                    field,
                    min: "1".into(),
                    value: value.to_string(),
                });
            }
        }
        Ok(Self { max_key_size, max_value_size })
    }

    /// Returns the maximum allowed key size in bytes.
    #[must_use]
    pub fn max_key_size(&self) -> usize {
        self.max_key_size
    }

    /// Returns the maximum allowed value size in bytes.
    #[must_use]
    pub fn max_value_size(&self) -> usize {
        self.max_value_size
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self { max_key_size: DEFAULT_MAX_KEY_SIZE, max_value_size: DEFAULT_MAX_VALUE_SIZE }
    }
}

/// Validates key and value sizes against `limits`.
///
/// # Errors
///
/// Returns [`StorageError::SizeLimitExceeded`] naming whichever limit was hit
/// first (key before value).
pub fn validate_sizes(key: &[u8], value: &[u8], limits: &SizeLimits) -> Result<(), StorageError> {
    validate_key_size(key, limits)?;
    if value.len() > limits.max_value_size {
        return Err(StorageError::SizeLimitExceeded {
            kind: "value",
            actual: value.len(),
            limit: limits.max_value_size,
        });
    }
    Ok(())
}

/// Validates key size only.
///
/// # Errors
///
/// Returns [`StorageError::SizeLimitExceeded`] if the key is too long.
pub fn validate_key_size(key: &[u8], limits: &SizeLimits) -> Result<(), StorageError> {
    if key.len() > limits.max_key_size {
        return Err(StorageError::SizeLimitExceeded {
            kind: "key",
            actual: key.len(),
            limit: limits.max_key_size,
        });
    }
    Ok(())
}
