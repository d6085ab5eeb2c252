//! Human-readable renderings of [`KillaStats`].

use crate::engine::KillaStats;

/// Placeholder shown when a pace value is undefined.
pub const NOT_AVAILABLE: &str = "N/A";

const FILLED_GLYPH: char = '█';
const EMPTY_GLYPH: char = '░';

/// Formats a duration as its two most significant non-zero units among
/// days, hours and minutes (`"1d 4h"`, `"3h 12m"`), or seconds alone when
/// all three are zero (`"37s"`).
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let total_hours = total_minutes / 60;
    let hours = total_hours % 24;
    let days = total_hours / 24;

    let parts: Vec<String> = [(days, 'd'), (hours, 'h'), (minutes, 'm')]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .take(2)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        format!("{seconds}s")
    } else {
        parts.join(" ")
    }
}

/// Time between the two most recent kills, or `"N/A"`.
pub fn format_last_kill(stats: &KillaStats) -> String {
    stats
        .last_interval_ms
        .map_or_else(|| NOT_AVAILABLE.to_string(), format_duration)
}

/// Today's average interval, or `"N/A"` with fewer than two kills today.
pub fn format_today_average(stats: &KillaStats) -> String {
    match stats.today_avg_interval_ms {
        Some(avg) if stats.kills_today >= 2 => format_duration(avg as i64),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// A rendered progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    /// `size` glyphs, filled then empty.
    pub bar: String,
    /// Rounded completion percentage, 0 to 100.
    pub percent: u8,
}

/// Renders `current / total` as a bar of `size` glyphs.
///
/// The ratio is clamped to `[0, 1]`; a non-positive total is treated as 1.
pub fn render_progress_bar(current: u64, total: u64, size: usize) -> ProgressBar {
    let safe_total = if total > 0 { total } else { 1 };
    let ratio = (current as f64 / safe_total as f64).clamp(0.0, 1.0);
    let filled = ((ratio * size as f64).round() as usize).min(size);

    let bar = std::iter::repeat(FILLED_GLYPH)
        .take(filled)
        .chain(std::iter::repeat(EMPTY_GLYPH).take(size - filled))
        .collect();

    ProgressBar {
        bar,
        percent: (ratio * 100.0).round() as u8,
    }
}
