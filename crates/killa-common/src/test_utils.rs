//! Test utilities and shared fixtures for Killa Bot.
//!
//! Available to unit tests in this crate and, through the `testing` feature,
//! to the tests of every other crate in the workspace.

use crate::types::{KillEvent, ResetMarker, UserId};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        // Another test binary component may already own the global subscriber.
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a UTC timestamp for tests.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Discord-related test utilities.
pub mod discord_fixtures {
    use crate::UserId;

    /// The user owning the counter in most tests.
    pub fn test_user_id() -> UserId {
        UserId(987_654_321_098_765_432)
    }

    /// A second user, used to check ownership rules and isolation.
    pub fn other_user_id() -> UserId {
        UserId(123_456_789_012_345_678)
    }

    /// Create multiple test user IDs.
    pub fn test_user_ids(count: usize) -> Vec<UserId> {
        (0..count)
            .map(|i| UserId(100_000_000_000_000_000 + i as u64))
            .collect()
    }
}

/// Kill timeline fixtures.
pub mod timeline_fixtures {
    use super::*;

    /// Build an ascending timeline of kills at `start + offset` for each offset in minutes.
    pub fn kills_at_minutes(user_id: UserId, start: DateTime<Utc>, offsets: &[i64]) -> Vec<KillEvent> {
        offsets
            .iter()
            .enumerate()
            .map(|(i, minutes)| KillEvent::new(i as i64 + 1, user_id, start + Duration::minutes(*minutes)))
            .collect()
    }

    /// Build a reset marker at `start + minutes`.
    pub fn reset_at_minutes(user_id: UserId, start: DateTime<Utc>, minutes: i64) -> ResetMarker {
        ResetMarker::new(user_id, start + Duration::minutes(minutes))
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use crate::UserId;
    use proptest::prelude::*;

    /// Strategy for generating valid Discord user IDs.
    pub fn user_id_strategy() -> impl Strategy<Value = UserId> {
        (100_000_000_000_000_000u64..=999_999_999_999_999_999u64).prop_map(UserId)
    }

    /// Strategy for kill offsets in milliseconds, spread over three days.
    pub fn kill_offsets_strategy() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(0i64..(3 * 24 * 60 * 60 * 1000), 0..40)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_mock_timestamp() {
        let timestamp = mock_timestamp(2024, 1, 1, 12, 0, 0);
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.month(), 1);
        assert_eq!(timestamp.day(), 1);
        assert_eq!(timestamp.hour(), 12);
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_kills_at_minutes_is_ascending() {
        let start = mock_timestamp(2024, 5, 1, 9, 0, 0);
        let user = discord_fixtures::test_user_id();
        let events = timeline_fixtures::kills_at_minutes(user, start, &[0, 10, 30]);

        assert_eq!(events.len(), 3);
        assert!(events.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(events[2].timestamp, start + Duration::minutes(30));
        assert!(events.iter().all(|e| e.user_id == user));
    }

    #[test]
    fn test_user_ids_are_distinct() {
        let ids = discord_fixtures::test_user_ids(5);
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }
}
