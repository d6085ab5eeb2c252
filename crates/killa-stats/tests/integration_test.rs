//! Integration tests for killa-stats crate.
//!
//! These exercise the engine and the formatting contracts together, the way
//! the command layer consumes them.

use chrono::Duration;
use killa_common::test_utils::{
    discord_fixtures::test_user_id, mock_timestamp, timeline_fixtures::kills_at_minutes,
};
use killa_stats::{
    format_last_kill, format_today_average, render_progress_bar, DayBoundary, KillaStats,
    StatsEngine,
};

#[test]
fn test_no_events_formats_as_not_available() {
    let engine = StatsEngine::new(DayBoundary::Zone(chrono_tz::UTC));
    let stats = engine.compute(&[], None, mock_timestamp(2024, 1, 1, 12, 0, 0));

    assert_eq!(stats, KillaStats::empty());
    assert_eq!(format_last_kill(&stats), "N/A");
    assert_eq!(format_today_average(&stats), "N/A");
}

#[test]
fn test_pace_for_three_kills() {
    let engine = StatsEngine::new(DayBoundary::Zone(chrono_tz::UTC));
    let t0 = mock_timestamp(2024, 1, 1, 9, 0, 0);
    let events = kills_at_minutes(test_user_id(), t0, &[0, 10, 30]);

    let stats = engine.compute(&events, None, t0 + Duration::hours(1));

    assert_eq!(format_last_kill(&stats), "20m");
    assert_eq!(format_today_average(&stats), "15m");
}

#[test]
fn test_yesterdays_kills_only_count_toward_total() {
    let engine = StatsEngine::new(DayBoundary::Zone(chrono_tz::UTC));
    let yesterday = mock_timestamp(2024, 1, 1, 20, 0, 0);
    let events = kills_at_minutes(test_user_id(), yesterday, &[0, 90]);
    let now = mock_timestamp(2024, 1, 2, 8, 0, 0);

    let stats = engine.compute(&events, None, now);

    assert_eq!(stats.total_kills, 2);
    assert_eq!(stats.kills_today, 0);
    assert_eq!(format_last_kill(&stats), "1h 30m");
    assert_eq!(format_today_average(&stats), "N/A");

    let progress = render_progress_bar(stats.total_kills as u64, 100, 14);
    assert_eq!(progress.percent, 2);
}
