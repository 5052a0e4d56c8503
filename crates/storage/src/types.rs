//! Common types used across storage operations.

use std::ops::Bound;

use bytes::Bytes;

/// Key-value pair returned from range queries.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use devgate_storage::KeyValue;
///
/// let kv = KeyValue::new(Bytes::from("devgate_access:42"), Bytes::from("{}"));
/// assert_eq!(kv.key, Bytes::from("devgate_access:42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// The key identifying this entry.
    pub key: Bytes,

    /// The value stored at this key.
    pub value: Bytes,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: Bytes, value: Bytes) -> Self {
        Self { key, value }
    }
}

/// Builds the range covering every key that starts with `prefix`.
///
/// The upper bound is the prefix with its last non-`0xFF` byte incremented
/// (trailing `0xFF` bytes dropped). A prefix made only of `0xFF` bytes, or an
/// empty prefix, has no upper bound.
///
/// ```
/// use std::ops::{Bound, RangeBounds};
///
/// use devgate_storage::prefix_range;
///
/// let range = prefix_range(b"ns:");
/// assert!(range.contains(&b"ns:alice".to_vec()));
/// assert!(!range.contains(&b"ns;".to_vec()));
/// assert_eq!(range.1, Bound::Excluded(b"ns;".to_vec()));
/// ```
#[must_use]
pub fn prefix_range(prefix: &[u8]) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
    let start = Bound::Included(prefix.to_vec());

    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return (start, Bound::Excluded(end));
        }
    }
    (start, Bound::Unbounded)
}
