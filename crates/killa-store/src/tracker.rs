//! Per-user kill tracking: every mutation is followed by a full recompute.

use crate::clock::{Clock, SystemClock};
use crate::store::KillStore;
use chrono::{DateTime, Utc};
use killa_common::{Result, UserId};
use killa_stats::{KillaStats, StatsEngine};
use std::sync::Arc;
use tracing::{debug, info};

/// Records kills and resets for users and reports fresh stats after each call.
pub struct KillTracker {
    store: Arc<dyn KillStore>,
    clock: Arc<dyn Clock>,
    engine: StatsEngine,
}

impl std::fmt::Debug for KillTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KillTracker")
            .field("store", &"<KillStore>")
            .field("clock", &"<Clock>")
            .field("engine", &self.engine)
            .finish()
    }
}

impl KillTracker {
    /// Creates a tracker over `store`, stamping events with `clock`.
    pub fn new(store: Arc<dyn KillStore>, clock: Arc<dyn Clock>, engine: StatsEngine) -> Self {
        Self {
            store,
            clock,
            engine,
        }
    }

    /// Creates a tracker that uses wall-clock time.
    pub fn with_system_clock(store: Arc<dyn KillStore>, engine: StatsEngine) -> Self {
        Self::new(store, Arc::new(SystemClock), engine)
    }

    /// Records a kill now. Rapid repeats each count.
    pub async fn add_kill(&self, user_id: UserId) -> Result<KillaStats> {
        let now = self.clock.now();
        self.store.append_kill(user_id, now).await?;
        info!("User {} recorded a kill", user_id);
        self.stats_at(user_id, now).await
    }

    /// Deletes the user's most recent kill, if any.
    pub async fn remove_last_kill(&self, user_id: UserId) -> Result<KillaStats> {
        let removed = self.store.remove_latest_kill(user_id).await?;
        if removed {
            info!("User {} removed their latest kill", user_id);
        } else {
            debug!("User {} had no kill to remove", user_id);
        }
        self.get_stats(user_id).await
    }

    /// Moves the user's "today" cutoff to now.
    pub async fn reset_today(&self, user_id: UserId) -> Result<KillaStats> {
        let now = self.clock.now();
        self.store.upsert_reset(user_id, now).await?;
        info!("User {} reset today's counter", user_id);
        self.stats_at(user_id, now).await
    }

    /// Current stats without mutating anything.
    pub async fn get_stats(&self, user_id: UserId) -> Result<KillaStats> {
        self.stats_at(user_id, self.clock.now()).await
    }

    async fn stats_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<KillaStats> {
        let kills = self.store.kills(user_id).await?;
        let reset = self.store.reset_marker(user_id).await?;
        let stats = self.engine.compute(&kills, reset.as_ref(), now);
        debug!(
            "Stats for user {}: total={} today={}",
            user_id, stats.total_kills, stats.kills_today
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::memory::MemoryKillStore;
    use crate::store::MockKillStore;
    use chrono::Duration;
    use killa_common::test_utils::{
        assert_approx_eq,
        discord_fixtures::{other_user_id, test_user_id},
        mock_timestamp,
    };
    use killa_common::KillaError;
    use killa_stats::DayBoundary;

    fn utc_engine() -> StatsEngine {
        StatsEngine::new(DayBoundary::Zone(chrono_tz::UTC))
    }

    fn tracker_at(start: DateTime<Utc>) -> (KillTracker, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start));
        let tracker = KillTracker::new(Arc::new(MemoryKillStore::new()), clock.clone(), utc_engine());
        (tracker, clock)
    }

    #[tokio::test]
    async fn test_new_user_has_empty_stats() {
        let (tracker, _) = tracker_at(mock_timestamp(2024, 9, 1, 9, 0, 0));
        assert_eq!(tracker.get_stats(test_user_id()).await.unwrap(), KillaStats::empty());
    }

    #[tokio::test]
    async fn test_three_kills_pace() {
        let (tracker, clock) = tracker_at(mock_timestamp(2024, 9, 1, 9, 0, 0));
        let user = test_user_id();

        tracker.add_kill(user).await.unwrap();
        clock.advance(Duration::minutes(10));
        tracker.add_kill(user).await.unwrap();
        clock.advance(Duration::minutes(20));
        let stats = tracker.add_kill(user).await.unwrap();

        assert_eq!(stats.total_kills, 3);
        assert_eq!(stats.kills_today, 3);
        assert_eq!(stats.last_interval_ms, Some(20 * 60_000));
        assert_approx_eq(stats.today_avg_interval_ms.unwrap(), 15.0 * 60_000.0, 1e-9);
    }

    #[tokio::test]
    async fn test_reset_then_kill_is_only_entry_today() {
        let (tracker, clock) = tracker_at(mock_timestamp(2024, 9, 1, 9, 0, 0));
        let user = test_user_id();

        tracker.add_kill(user).await.unwrap();
        clock.advance(Duration::minutes(5));
        tracker.add_kill(user).await.unwrap();

        clock.advance(Duration::minutes(1));
        let after_reset = tracker.reset_today(user).await.unwrap();
        assert_eq!(after_reset.kills_today, 0);
        assert_eq!(after_reset.total_kills, 2);

        let stats = tracker.add_kill(user).await.unwrap();
        assert_eq!(stats.kills_today, 1);
        assert_eq!(stats.total_kills, 3);
        assert_eq!(stats.today_avg_interval_ms, None);
        assert_eq!(stats.last_interval_ms, Some(60_000));
    }

    #[tokio::test]
    async fn test_remove_last_kill_until_empty() {
        let (tracker, _) = tracker_at(mock_timestamp(2024, 9, 1, 9, 0, 0));
        let user = test_user_id();

        tracker.add_kill(user).await.unwrap();
        let stats = tracker.remove_last_kill(user).await.unwrap();
        assert_eq!(stats, KillaStats::empty());

        let again = tracker.remove_last_kill(user).await.unwrap();
        assert_eq!(again, KillaStats::empty());
    }

    #[tokio::test]
    async fn test_double_submission_counts_twice() {
        let (tracker, _) = tracker_at(mock_timestamp(2024, 9, 1, 9, 0, 0));
        let user = test_user_id();

        tracker.add_kill(user).await.unwrap();
        let stats = tracker.add_kill(user).await.unwrap();

        assert_eq!(stats.total_kills, 2);
        assert_eq!(stats.last_interval_ms, Some(0));
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let (tracker, _) = tracker_at(mock_timestamp(2024, 9, 1, 9, 0, 0));

        tracker.add_kill(test_user_id()).await.unwrap();
        tracker.reset_today(other_user_id()).await.unwrap();

        assert_eq!(tracker.get_stats(test_user_id()).await.unwrap().kills_today, 1);
        assert_eq!(tracker.get_stats(other_user_id()).await.unwrap().total_kills, 0);
    }

    #[tokio::test]
    async fn test_day_rollover_clears_today_only() {
        let (tracker, clock) = tracker_at(mock_timestamp(2024, 9, 1, 23, 50, 0));
        let user = test_user_id();

        tracker.add_kill(user).await.unwrap();
        clock.advance(Duration::minutes(20));

        let stats = tracker.get_stats(user).await.unwrap();
        assert_eq!(stats.total_kills, 1);
        assert_eq!(stats.kills_today, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_propagated() {
        let mut store = MockKillStore::new();
        store
            .expect_append_kill()
            .returning(|_, _| Err(KillaError::database("disk full")));
        store.expect_kills().never();

        let tracker = KillTracker::new(
            Arc::new(store),
            Arc::new(ManualClock::new(mock_timestamp(2024, 9, 1, 9, 0, 0))),
            utc_engine(),
        );

        let error = tracker.add_kill(test_user_id()).await.unwrap_err();
        assert!(matches!(error, KillaError::Database { .. }));
    }

    #[tokio::test]
    async fn test_read_failure_after_write_is_propagated() {
        let mut store = MockKillStore::new();
        store.expect_upsert_reset().times(1).returning(|_, _| Ok(()));
        store
            .expect_kills()
            .returning(|_| Err(KillaError::database("connection reset")));

        let tracker = KillTracker::new(
            Arc::new(store),
            Arc::new(ManualClock::new(mock_timestamp(2024, 9, 1, 9, 0, 0))),
            utc_engine(),
        );

        assert!(tracker.reset_today(test_user_id()).await.is_err());
    }
}
