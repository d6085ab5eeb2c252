//! Aggregate statistics over a user's kill timeline.

use crate::boundary::DayBoundary;
use chrono::{DateTime, Utc};
use killa_common::{KillEvent, ResetMarker};
use serde::{Deserialize, Serialize};

/// Aggregates computed fresh from the full timeline on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KillaStats {
    /// Every kill the user ever recorded, regardless of resets.
    pub total_kills: usize,
    /// Gap between the two most recent kills, across day boundaries.
    pub last_interval_ms: Option<i64>,
    /// Span of today's kills divided by the number of intervals between them.
    pub today_avg_interval_ms: Option<f64>,
    /// Kills at or after the effective cutoff.
    pub kills_today: usize,
}

impl KillaStats {
    /// Stats for a user with no recorded kills.
    pub const fn empty() -> Self {
        Self {
            total_kills: 0,
            last_interval_ms: None,
            today_avg_interval_ms: None,
            kills_today: 0,
        }
    }
}

/// The later of the start of today and the user's reset marker.
pub fn effective_cutoff(day_start: DateTime<Utc>, reset: Option<&ResetMarker>) -> DateTime<Utc> {
    match reset {
        Some(marker) if marker.reset_after > day_start => marker.reset_after,
        _ => day_start,
    }
}

/// Computes stats for one user's events given the start of the current day.
///
/// Events may arrive in any order; they are sorted by timestamp first.
pub fn compute_stats(
    events: &[KillEvent],
    reset: Option<&ResetMarker>,
    day_start: DateTime<Utc>,
) -> KillaStats {
    let mut timestamps: Vec<DateTime<Utc>> = events.iter().map(|e| e.timestamp).collect();
    timestamps.sort_unstable();

    let total_kills = timestamps.len();

    let last_interval_ms = match timestamps.as_slice() {
        [.., prev, last] => Some((*last - *prev).num_milliseconds()),
        _ => None,
    };

    let cutoff = effective_cutoff(day_start, reset);
    let first_today = timestamps.partition_point(|t| *t < cutoff);
    let today = &timestamps[first_today..];
    let kills_today = today.len();

    let today_avg_interval_ms = match today {
        [first, .., last] => {
            let span = (*last - *first).num_milliseconds() as f64;
            Some(span / (kills_today - 1) as f64)
        }
        _ => None,
    };

    KillaStats {
        total_kills,
        last_interval_ms,
        today_avg_interval_ms,
        kills_today,
    }
}

/// Computes stats relative to "now" using a configured day boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsEngine {
    boundary: DayBoundary,
}

impl StatsEngine {
    /// Creates an engine using the given day boundary.
    pub const fn new(boundary: DayBoundary) -> Self {
        Self { boundary }
    }

    /// The boundary deciding where today begins.
    pub const fn boundary(&self) -> DayBoundary {
        self.boundary
    }

    /// Computes stats for `events` as seen at `now`.
    pub fn compute(
        &self,
        events: &[KillEvent],
        reset: Option<&ResetMarker>,
        now: DateTime<Utc>,
    ) -> KillaStats {
        compute_stats(events, reset, self.boundary.start_of_day(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use killa_common::test_utils::{
        assert_approx_eq, discord_fixtures::test_user_id, mock_timestamp,
        timeline_fixtures::{kills_at_minutes, reset_at_minutes},
    };

    const MINUTE_MS: i64 = 60_000;

    fn midnight() -> DateTime<Utc> {
        mock_timestamp(2024, 4, 20, 0, 0, 0)
    }

    #[test]
    fn test_empty_timeline() {
        let stats = compute_stats(&[], None, midnight());
        assert_eq!(stats, KillaStats::empty());
    }

    #[test]
    fn test_three_kills_today() {
        let t0 = midnight() + Duration::hours(9);
        let events = kills_at_minutes(test_user_id(), t0, &[0, 10, 30]);

        let stats = compute_stats(&events, None, midnight());

        assert_eq!(stats.total_kills, 3);
        assert_eq!(stats.kills_today, 3);
        assert_eq!(stats.last_interval_ms, Some(20 * MINUTE_MS));
        assert_approx_eq(stats.today_avg_interval_ms.unwrap(), 15.0 * MINUTE_MS as f64, 1e-9);
    }

    #[test]
    fn test_single_kill_today_has_no_average() {
        let events = kills_at_minutes(test_user_id(), midnight(), &[5]);
        let stats = compute_stats(&events, None, midnight());

        assert_eq!(stats.total_kills, 1);
        assert_eq!(stats.kills_today, 1);
        assert_eq!(stats.last_interval_ms, None);
        assert_eq!(stats.today_avg_interval_ms, None);
    }

    #[test]
    fn test_last_interval_spans_midnight() {
        // 23:50 yesterday and 00:20 today.
        let events = kills_at_minutes(test_user_id(), midnight(), &[-10, 20]);
        let stats = compute_stats(&events, None, midnight());

        assert_eq!(stats.total_kills, 2);
        assert_eq!(stats.kills_today, 1);
        assert_eq!(stats.last_interval_ms, Some(30 * MINUTE_MS));
        assert_eq!(stats.today_avg_interval_ms, None);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let mut events = kills_at_minutes(test_user_id(), midnight(), &[0, 10, 30]);
        events.reverse();

        let stats = compute_stats(&events, None, midnight());
        assert_eq!(stats.last_interval_ms, Some(20 * MINUTE_MS));
    }

    #[test]
    fn test_reset_moves_cutoff_forward() {
        let user = test_user_id();
        let events = kills_at_minutes(user, midnight(), &[60, 120, 180, 240]);
        let reset = reset_at_minutes(user, midnight(), 150);

        let stats = compute_stats(&events, Some(&reset), midnight());

        assert_eq!(stats.total_kills, 4);
        assert_eq!(stats.kills_today, 2);
        assert_approx_eq(stats.today_avg_interval_ms.unwrap(), 60.0 * MINUTE_MS as f64, 1e-9);
    }

    #[test]
    fn test_stale_reset_does_not_extend_window_backward() {
        let user = test_user_id();
        let events = kills_at_minutes(user, midnight(), &[-120, -60, 30]);
        let yesterday_reset = reset_at_minutes(user, midnight(), -180);

        let stats = compute_stats(&events, Some(&yesterday_reset), midnight());

        assert_eq!(stats.kills_today, 1);
        assert_eq!(effective_cutoff(midnight(), Some(&yesterday_reset)), midnight());
    }

    #[test]
    fn test_kill_at_reset_instant_counts_today() {
        let user = test_user_id();
        let events = kills_at_minutes(user, midnight(), &[10, 20]);
        let reset = reset_at_minutes(user, midnight(), 20);

        let stats = compute_stats(&events, Some(&reset), midnight());
        assert_eq!(stats.kills_today, 1);
    }

    #[test]
    fn test_reset_then_kill_is_only_entry_today() {
        let user = test_user_id();
        let events = kills_at_minutes(user, midnight(), &[10, 20, 31]);
        let reset = reset_at_minutes(user, midnight(), 30);

        let stats = compute_stats(&events, Some(&reset), midnight());

        assert_eq!(stats.kills_today, 1);
        assert_eq!(stats.today_avg_interval_ms, None);
        assert_eq!(stats.last_interval_ms, Some(11 * MINUTE_MS));
    }

    #[test]
    fn test_average_uses_span_over_intervals() {
        // Gaps of 1, 1 and 10 minutes: span 12 / 3 intervals = 4 minutes.
        let events = kills_at_minutes(test_user_id(), midnight(), &[0, 1, 2, 12]);
        let stats = compute_stats(&events, None, midnight());
        assert_approx_eq(stats.today_avg_interval_ms.unwrap(), 4.0 * MINUTE_MS as f64, 1e-9);
    }

    #[test]
    fn test_engine_uses_boundary() {
        let engine = StatsEngine::new(DayBoundary::Zone(chrono_tz::UTC));
        let events = kills_at_minutes(test_user_id(), midnight(), &[-5, 5, 15]);
        let now = midnight() + Duration::hours(1);

        let stats = engine.compute(&events, None, now);

        assert_eq!(stats.total_kills, 3);
        assert_eq!(stats.kills_today, 2);
        assert_eq!(engine.boundary(), DayBoundary::Zone(chrono_tz::UTC));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_today_never_exceeds_total(
                offsets in prop::collection::vec(-3_000i64..3_000, 0..40),
                reset in proptest::option::of(-3_000i64..3_000),
            ) {
                let user = test_user_id();
                let events = kills_at_minutes(user, midnight(), &offsets);
                let marker = reset.map(|m| reset_at_minutes(user, midnight(), m));

                let stats = compute_stats(&events, marker.as_ref(), midnight());

                prop_assert!(stats.kills_today <= stats.total_kills);
                prop_assert_eq!(stats.total_kills, offsets.len());
                prop_assert_eq!(stats.last_interval_ms.is_some(), stats.total_kills >= 2);
                prop_assert_eq!(stats.today_avg_interval_ms.is_some(), stats.kills_today >= 2);
            }

            #[test]
            fn prop_last_interval_is_gap_between_latest_two(
                offsets in prop::collection::vec(-3_000i64..3_000, 2..40),
            ) {
                let events = kills_at_minutes(test_user_id(), midnight(), &offsets);
                let stats = compute_stats(&events, None, midnight());

                let mut sorted = offsets.clone();
                sorted.sort_unstable();
                let n = sorted.len();
                prop_assert_eq!(stats.last_interval_ms, Some((sorted[n - 1] - sorted[n - 2]) * MINUTE_MS));
            }
        }
    }
}
