//! Calendar day boundaries in the server's or a configured timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Which timezone decides where "today" begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// The host's local timezone.
    #[default]
    Local,
    /// A fixed IANA timezone.
    Zone(Tz),
}

impl DayBoundary {
    /// Builds a boundary from an optional configured timezone.
    pub fn from_timezone(tz: Option<Tz>) -> Self {
        tz.map_or(Self::Local, Self::Zone)
    }

    /// Returns the instant the calendar day containing `now` started.
    pub fn start_of_day(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Local => start_of_day_in(&chrono::Local, now),
            Self::Zone(tz) => start_of_day_in(tz, now),
        }
    }
}

/// Midnight of `now`'s calendar day in `tz`, as a UTC instant.
///
/// When midnight is skipped by a DST transition the first valid wall-clock
/// instant of the day is used instead.
pub fn start_of_day_in<Z: TimeZone>(tz: &Z, now: DateTime<Utc>) -> DateTime<Utc> {
    let midnight = now
        .with_timezone(tz)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();

    first_valid_instant(tz, midnight)
}

fn first_valid_instant<Z: TimeZone>(tz: &Z, mut wall: NaiveDateTime) -> DateTime<Utc> {
    // DST gaps never exceed a few hours; step forward a minute at a time.
    for _ in 0..(24 * 60) {
        match tz.from_local_datetime(&wall) {
            LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => return t.with_timezone(&Utc),
            LocalResult::None => wall += Duration::minutes(1),
        }
    }
    Utc.from_utc_datetime(&wall)
}
