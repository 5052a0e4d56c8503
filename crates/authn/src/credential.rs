//! The shared secret that unlocks a grant.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::ValidationError;

/// Minimum credential length, in characters, unless configured otherwise.
pub const DEFAULT_MIN_CREDENTIAL_LENGTH: usize = 6;

/// A shared secret.
///
/// The buffer is wiped on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Wraps a secret without validating it.
    ///
    /// Use [`validate`](Self::validate) before persisting a secret chosen by
    /// an administrator.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Checks that the secret is non-empty and at least `min_length`
    /// characters long.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] or [`ValidationError::TooShort`].
    pub fn validate(&self, min_length: usize) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            return Err(ValidationError::Empty);
        }
        let actual = self.0.chars().count();
        if actual < min_length {
            return Err(ValidationError::TooShort { min: min_length, actual });
        }
        Ok(())
    }

    /// Compares `submitted` against this secret in constant time.
    ///
    /// An empty stored secret never matches, so an unconfigured gate cannot
    /// be unlocked with an empty submission.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }
        // `ct_eq` on slices of different lengths returns false without
        // comparing contents; only the length leaks.
        bool::from(self.0.as_bytes().ct_eq(submitted.as_bytes()))
    }

    /// Returns `true` if the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for Credential {
    fn from(secret: String) -> Self {
        Self::new(secret)
    }
}
