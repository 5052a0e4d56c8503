//! Configuration for the access gate.
//!
//! [`GateConfig`] decides where grants and the credential live in the store,
//! how long a grant lasts by default, and how short a credential may be.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use devgate_authn::GateConfig;
//!
//! let config = GateConfig::builder()
//!     .namespace("debug_tools_access")
//!     .default_ttl(Duration::from_secs(15 * 60))
//!     .build()?;
//!
//! assert_eq!(config.grant_key(&"42".into()), b"debug_tools_access:42".to_vec());
//! # Ok::<(), devgate_storage::ConfigError>(())
//! ```
//!
//! Loaded from a file, durations use humantime notation:
//!
//! ```
//! use devgate_authn::GateConfig;
//!
//! let config: GateConfig = serde_json::from_str(r#"{ "default_ttl": "30m" }"#).unwrap();
//! config.validate().unwrap();
//! assert_eq!(config.default_ttl().as_secs(), 1800);
//! ```

use std::{ops::Bound, time::Duration};

use devgate_storage::{ConfigError, prefix_range};
use serde::{Deserialize, Serialize};

use crate::{credential::DEFAULT_MIN_CREDENTIAL_LENGTH, types::Identity};

/// Default namespace for grant keys.
pub const DEFAULT_NAMESPACE: &str = "devgate_access";

/// Default store key for the shared credential.
pub const DEFAULT_CREDENTIAL_KEY: &str = "devgate_credential";

/// Default grant lifetime (30 minutes).
pub const DEFAULT_GRANT_TTL: Duration = Duration::from_secs(30 * 60);

/// Configuration for [`AccessGate`](crate::AccessGate).
///
/// Grants are stored at `"<namespace>:<identity>"`. The credential lives at
/// `credential_key`, which must fall outside that namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    #[serde(default = "default_namespace")]
    pub(crate) namespace: String,

    #[serde(default = "default_credential_key")]
    pub(crate) credential_key: String,

    #[serde(default = "default_min_credential_length")]
    pub(crate) min_credential_length: usize,

    #[serde(with = "humantime_serde", default = "default_ttl")]
    pub(crate) default_ttl: Duration,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_owned()
}

fn default_credential_key() -> String {
    DEFAULT_CREDENTIAL_KEY.to_owned()
}

fn default_min_credential_length() -> usize {
    DEFAULT_MIN_CREDENTIAL_LENGTH
}

fn default_ttl() -> Duration {
    DEFAULT_GRANT_TTL
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            credential_key: default_credential_key(),
            min_credential_length: default_min_credential_length(),
            default_ttl: default_ttl(),
        }
    }
}

#[bon::bon]
impl GateConfig {
    /// Creates a new configuration, validating all fields.
    ///
    /// # Optional Fields
    ///
    /// * `namespace` - Grant key namespace (default: `devgate_access`).
    /// * `credential_key` - Store key of the credential (default: `devgate_credential`).
    /// * `min_credential_length` - Minimum credential length in characters (default: 6).
    /// * `default_ttl` - Lifetime of grants issued without an explicit TTL (default: 30 minutes).
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    #[builder]
    pub fn new(
        #[builder(into, default = default_namespace())] namespace: String,
        #[builder(into, default = default_credential_key())] credential_key: String,
        #[builder(default = DEFAULT_MIN_CREDENTIAL_LENGTH)] min_credential_length: usize,
        #[builder(default = DEFAULT_GRANT_TTL)] default_ttl: Duration,
    ) -> Result<Self, ConfigError> {
        let config = Self { namespace, credential_key, min_credential_length, default_ttl };
        config.validate()?;
        Ok(config)
    }
}

impl GateConfig {
    /// Checks the configuration.
    ///
    /// Deserialized configurations are not validated automatically; call this
    /// before handing one to a gate.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Empty`] if `namespace` or `credential_key` is empty.
    /// - [`ConfigError::BelowMinimum`] if `min_credential_length` or `default_ttl` is zero.
    /// - [`ConfigError::Invalid`] if `credential_key` falls inside the grant namespace.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() {
            return Err(ConfigError::Empty { field: "namespace" });
        }
        if self.credential_key.is_empty() {
            return Err(ConfigError::Empty { field: "credential_key" });
        }
        if self.min_credential_length == 0 {
            return Err(ConfigError::BelowMinimum {
                field: "min_credential_length",
                min: "1".into(),
                value: "0".into(),
            });
        }
        if self.default_ttl.is_zero() {
            return Err(ConfigError::BelowMinimum {
                field: "default_ttl",
                min: "1ns".into(),
                value: "0s".into(),
            });
        }
        if self.credential_key.starts_with(&format!("{}:", self.namespace)) {
            return Err(ConfigError::Invalid {
                field: "credential_key",
                reason: format!("must not start with the grant prefix `{}:`", self.namespace),
            });
        }
        Ok(())
    }

    /// Returns the grant key namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the store key of the credential.
    #[must_use]
    pub fn credential_key(&self) -> &str {
        &self.credential_key
    }

    /// Returns the minimum credential length in characters.
    #[must_use]
    pub fn min_credential_length(&self) -> usize {
        self.min_credential_length
    }

    /// Returns the default grant lifetime.
    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Store key of `identity`'s grant.
    #[must_use]
    pub fn grant_key(&self, identity: &Identity) -> Vec<u8> {
        format!("{}:{}", self.namespace, identity).into_bytes()
    }

    pub(crate) fn grant_prefix(&self) -> Vec<u8> {
        format!("{}:", self.namespace).into_bytes()
    }

    pub(crate) fn grant_range(&self) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
        prefix_range(&self.grant_prefix())
    }
}
