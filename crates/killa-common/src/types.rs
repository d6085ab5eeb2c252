//! Domain types shared by the stats engine, the event store and the commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Discord user ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    /// Returns the raw snowflake value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One recorded kill for a user.
///
/// `id` is the surrogate key assigned by the store; two events may share a
/// timestamp but never an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillEvent {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owner of the event.
    pub user_id: UserId,
    /// When the kill was recorded.
    pub timestamp: DateTime<Utc>,
}

impl KillEvent {
    /// Creates a kill event.
    pub const fn new(id: i64, user_id: UserId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            timestamp,
        }
    }
}

/// Per-user cutoff: events before `reset_after` no longer count toward today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetMarker {
    /// Owner of the marker.
    pub user_id: UserId,
    /// Instant the user last reset their daily counter.
    pub reset_after: DateTime<Utc>,
}

impl ResetMarker {
    /// Creates a reset marker.
    pub const fn new(user_id: UserId, reset_after: DateTime<Utc>) -> Self {
        Self {
            user_id,
            reset_after,
        }
    }
}
