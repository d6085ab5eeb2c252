//! The storage seam between the tracker and a concrete database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use killa_common::{KillEvent, ResetMarker, Result, UserId};

/// Per-user persistence for kill events and reset markers.
///
/// Implementations must make each mutation atomic so that concurrent calls
/// for the same user never lose an event or a marker.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KillStore: Send + Sync {
    /// Appends a kill for `user_id` at `at`.
    async fn append_kill(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()>;

    /// Deletes the user's most recent kill. Returns `false` when there was none.
    async fn remove_latest_kill(&self, user_id: UserId) -> Result<bool>;

    /// Inserts or overwrites the user's reset marker.
    async fn upsert_reset(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()>;

    /// All of the user's kills in ascending timestamp order.
    async fn kills(&self, user_id: UserId) -> Result<Vec<KillEvent>>;

    /// The user's reset marker, if they ever reset.
    async fn reset_marker(&self, user_id: UserId) -> Result<Option<ResetMarker>>;
}
