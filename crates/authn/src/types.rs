//! Caller identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque key identifying the caller that requests access, typically the
/// authenticated user's ID.
///
/// The gate never interprets the value; it only uses it to build the storage
/// key of the caller's grant.
///
/// ```
/// use devgate_authn::Identity;
///
/// assert_eq!(Identity::from(42_u64).to_string(), "42");
/// assert_eq!(Identity::from("session-abc").as_str(), "session-abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wraps an identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for Identity {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
