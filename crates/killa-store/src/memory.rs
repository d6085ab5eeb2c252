//! In-process kill storage with no durability.

use crate::store::KillStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use killa_common::{KillEvent, ResetMarker, Result, UserId};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    kills: HashMap<UserId, Vec<KillEvent>>,
    resets: HashMap<UserId, ResetMarker>,
}

/// Kill store held in memory; contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKillStore {
    state: RwLock<MemoryState>,
}

impl MemoryKillStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KillStore for MemoryKillStore {
    async fn append_kill(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.write();
        state.next_id += 1;
        let event = KillEvent::new(state.next_id, user_id, at);

        let timeline = state.kills.entry(user_id).or_default();
        // Ids grow monotonically, so ties on timestamp keep insertion order.
        let position = timeline.partition_point(|e| e.timestamp <= at);
        timeline.insert(position, event);
        Ok(())
    }

    async fn remove_latest_kill(&self, user_id: UserId) -> Result<bool> {
        let mut state = self.state.write();
        Ok(state
            .kills
            .get_mut(&user_id)
            .and_then(Vec::pop)
            .is_some())
    }

    async fn upsert_reset(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()> {
        self.state
            .write()
            .resets
            .insert(user_id, ResetMarker::new(user_id, at));
        Ok(())
    }

    async fn kills(&self, user_id: UserId) -> Result<Vec<KillEvent>> {
        Ok(self
            .state
            .read()
            .kills
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn reset_marker(&self, user_id: UserId) -> Result<Option<ResetMarker>> {
        Ok(self.state.read().resets.get(&user_id).copied())
    }
}
