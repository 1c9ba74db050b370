use std::time::{SystemTime, UNIX_EPOCH};

use crate::{CapError, CapResult, CapabilityPayload, RequestPayload};

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Something that may stop being valid at some point in time.
pub trait Expiring {
    /// Returns the time, in epoch seconds, from which the value is no longer valid.
    fn expiration(&self) -> Option<u64>;
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns the current time in epoch seconds.
///
/// A clock set before the epoch reads as `u64::MAX`, at which every expiring value is expired.
pub fn now() -> u64 {
    epoch_seconds(SystemTime::now())
}

fn epoch_seconds(time: SystemTime) -> u64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(err) => {
            tracing::warn!(behind = ?err.duration(), "system clock is before the unix epoch");
            u64::MAX
        }
    }
}

/// Fails if `value` is expired at `at`.
///
/// A value without an expiration never expires. The expiration itself is already invalid.
pub fn assert_non_expired(value: &impl Expiring, at: u64) -> CapResult<()> {
    match value.expiration() {
        Some(exp) if at >= exp => Err(CapError::Expired { exp, at }),
        _ => Ok(()),
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Expiring for CapabilityPayload {
    fn expiration(&self) -> Option<u64> {
        self.expiration
    }
}

impl Expiring for RequestPayload {
    fn expiration(&self) -> Option<u64> {
        self.capability.expiration
    }
}

impl Expiring for Option<u64> {
    fn expiration(&self) -> Option<u64> {
        *self
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_assert_non_expired() {
        let at = now();

        assert!(assert_non_expired(&Some(at + 1000), at).is_ok());
        assert!(assert_non_expired(&None::<u64>, at).is_ok());

        let err = assert_non_expired(&Some(at - 1000), at).unwrap_err();
        assert!(err.to_string().contains("expired"));

        // `exp` is exclusive.
        assert!(assert_non_expired(&Some(at), at).is_err());
        assert!(assert_non_expired(&Some(at + 1), at).is_ok());
    }

    #[test]
    fn test_now_is_in_seconds() {
        // 2020-01-01 and 2100-01-01.
        let at = now();
        assert!(at > 1_577_836_800);
        assert!(at < 4_102_444_800);
    }

    #[test_log::test]
    fn test_clock_before_epoch_expires_everything() {
        let at = epoch_seconds(UNIX_EPOCH - Duration::from_secs(1));
        assert_eq!(at, u64::MAX);
        assert!(assert_non_expired(&Some(4_102_444_800), at).is_err());
        assert!(assert_non_expired(&Some(u64::MAX), at).is_err());
        assert!(assert_non_expired(&None::<u64>, at).is_ok());

        assert_eq!(epoch_seconds(UNIX_EPOCH + Duration::from_secs(90)), 90);
    }
}
