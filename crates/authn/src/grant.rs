//! Time-boxed access grants.

use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GateError, GateResult},
    types::Identity,
};

/// A time-boxed access approval for one identity.
///
/// Each identity holds at most one grant; issuing a new one overwrites the
/// old. A grant is valid while `now < expires_at`.
///
/// Timestamps have millisecond precision and are stored as milliseconds
/// since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    /// Identity the grant belongs to.
    pub identity: Identity,
    /// When the grant was issued.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub issued_at: DateTime<Utc>,
    /// When the grant lapses.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Issues a grant at `now` lasting `ttl`.
    ///
    /// `issued_at` is truncated to the millisecond and `expires_at` rounded
    /// up, so any non-zero `ttl` yields a grant that is valid at `now`. A
    /// `ttl` too large for the calendar is clamped to the latest
    /// representable time.
    #[must_use]
    pub fn issue(identity: Identity, now: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = now.trunc_subsecs(3);
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .map_or(DateTime::<Utc>::MAX_UTC.trunc_subsecs(3), ceil_millis);
        Self { identity, issued_at, expires_at }
    }

    /// Returns `true` if the grant is still valid at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left at `now`, or zero once lapsed.
    #[must_use]
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }

    pub(crate) fn to_bytes(&self) -> GateResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| GateError::Serialization { message: e.to_string() })
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> GateResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| GateError::Serialization { message: e.to_string() })
    }
}

fn ceil_millis(at: DateTime<Utc>) -> DateTime<Utc> {
    let floor = at.trunc_subsecs(3);
    if floor == at {
        return floor;
    }
    floor.checked_add_signed(chrono::Duration::milliseconds(1)).unwrap_or(floor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_validity_boundary_is_exclusive() {
        let grant = AccessGrant::issue(Identity::from(1_u64), at(1_000), Duration::from_secs(1800));

        assert_eq!(grant.expires_at, at(2_800));
        assert!(grant.is_valid_at(at(1_000)));
        assert!(grant.is_valid_at(at(2_799)));
        assert!(!grant.is_valid_at(at(2_800)));
    }

    #[test]
    fn test_remaining_time() {
        let grant = AccessGrant::issue(Identity::from("a"), at(0), Duration::from_secs(60));

        assert_eq!(grant.remaining_at(at(15)), Duration::from_secs(45));
        assert_eq!(grant.remaining_at(at(90)), Duration::ZERO);
    }

    #[test]
    fn test_huge_ttl_clamps_and_still_round_trips() {
        let grant = AccessGrant::issue(Identity::from("a"), at(0), Duration::MAX);
        assert_eq!(grant.expires_at, DateTime::<Utc>::MAX_UTC.trunc_subsecs(3));

        let decoded = AccessGrant::from_bytes(&grant.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, grant);
    }

    #[test]
    fn test_timestamps_are_kept_to_the_millisecond() {
        let now = DateTime::from_timestamp(10, 123_456_789).unwrap();
        let grant = AccessGrant::issue(Identity::from("a"), now, Duration::from_nanos(1_500_000));

        assert_eq!(grant.issued_at.timestamp_subsec_nanos(), 123_000_000);
        assert_eq!(grant.expires_at.timestamp_subsec_nanos(), 125_000_000);
    }

    #[test]
    fn test_sub_millisecond_ttl_is_valid_when_issued() {
        let now = DateTime::from_timestamp(10, 123_999_999).unwrap();
        for micros in [1, 500, 999] {
            let ttl = Duration::from_micros(micros);
            let grant = AccessGrant::issue(Identity::from("a"), now, ttl);

            assert!(grant.is_valid_at(now), "{ttl:?} grant lapsed at issue");
            assert_eq!(grant.expires_at.timestamp_subsec_nanos(), 124_000_000);
        }
    }

    #[test]
    fn test_stored_form_is_json() {
        let grant = AccessGrant::issue(Identity::from(7_u64), at(0), Duration::from_secs(10));
        let bytes = grant.to_bytes().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["identity"], "7");
        assert_eq!(value["expires_at"], 10_000);
        assert_eq!(AccessGrant::from_bytes(&bytes).unwrap(), grant);
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        let err = AccessGrant::from_bytes(b"not json").unwrap_err();
        assert!(matches!(err, GateError::Serialization { .. }));
    }
}
