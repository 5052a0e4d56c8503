//! Key/value storage abstraction for devgate.
//!
//! This crate provides the [`StorageBackend`] trait that the access gate is
//! written against, standing in for the host platform's options/transient
//! storage, plus [`MemoryBackend`] as the in-process reference implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Request handlers / controllers       │
//! ├─────────────────────────────────────────────┤
//! │      devgate-authn (AccessGate, grants)     │
//! ├─────────────────────────────────────────────┤
//! │      devgate-storage: StorageBackend        │
//! │  (get, set, set_with_ttl, delete, ranges)   │
//! ├──────────────┬──────────────────────────────┤
//! │ MemoryBackend│   host-provided backends     │
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! use devgate_storage::{MemoryBackend, StorageBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MemoryBackend::new();
//!
//!     backend.set(b"devgate_credential".to_vec(), b"s3cret!".to_vec()).await?;
//!     backend
//!         .set_with_ttl(b"devgate_access:7".to_vec(), b"{}".to_vec(), Duration::from_secs(1800))
//!         .await?;
//!
//!     assert!(backend.get(b"devgate_access:7").await?.is_some());
//!     Ok(())
//! }
//! ```
//!
//! # Feature Flags
//!
//! - **`testutil`**: Enables the `testutil` module (`FlakyBackend`) for downstream tests.
//! - **`failpoints`**: Activates the `memory-set` and `memory-delete` fail points in
//!   [`MemoryBackend`].

#![deny(unsafe_code)]

pub mod backend;
pub mod error;
pub mod memory;
pub mod size_limits;
#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
pub mod types;

pub use backend::StorageBackend;
pub use error::{BoxError, ConfigError, StorageError, StorageResult};
pub use memory::MemoryBackend;
pub use size_limits::{
    DEFAULT_MAX_KEY_SIZE, DEFAULT_MAX_VALUE_SIZE, SizeLimits, validate_key_size, validate_sizes,
};
pub use types::{KeyValue, prefix_range};
