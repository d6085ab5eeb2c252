//! SQLite-backed kill storage.
//!
//! Two tables: an append-only event log (`killa_kills`) and a single row per
//! user for the reset marker (`killa_resets`). Timestamps are stored as
//! Unix milliseconds.

use crate::store::KillStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use killa_common::{KillEvent, KillaError, ResetMarker, Result, UserId};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Kill store persisted in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteKillStore {
    pool: SqlitePool,
}

impl SqliteKillStore {
    /// Opens (creating if needed) the database file at `path`.
    pub async fn open<P: AsRef<Path>>(path: P, max_connections: u32) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening kill database at {}", path.display());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| {
                KillaError::database_with_source(
                    format!("Failed to open database at {}", path.display()),
                    e,
                )
            })?;

        Self::with_pool(pool).await
    }

    /// Opens a private in-memory database.
    ///
    /// Every pooled connection to `:memory:` is a separate database, so the
    /// pool is pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| KillaError::database_with_source("Invalid in-memory database URL", e))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(|e| KillaError::database_with_source("Failed to open in-memory database", e))?;

        Self::with_pool(pool).await
    }

    /// Wraps an existing pool, creating the schema if it is missing.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        let store = Self { pool };
        store.initialize_schema().await?;
        Ok(store)
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        info!("Closing kill database");
        self.pool.close().await;
    }

    async fn initialize_schema(&self) -> Result<()> {
        debug!("Ensuring kill database schema");

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS killa_kills (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| KillaError::database_with_source("Failed to create killa_kills table", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_killa_kills_user_timestamp ON killa_kills(user_id, timestamp)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| KillaError::database_with_source("Failed to create killa_kills index", e))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS killa_resets (
                user_id TEXT PRIMARY KEY,
                reset_after INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| KillaError::database_with_source("Failed to create killa_resets table", e))?;

        Ok(())
    }
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| KillaError::database(format!("Stored timestamp {ms} is out of range")))
}

#[async_trait]
impl KillStore for SqliteKillStore {
    async fn append_kill(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("INSERT INTO killa_kills (user_id, timestamp) VALUES (?, ?)")
            .bind(user_id.to_string())
            .bind(at.timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| KillaError::database_with_source("Failed to insert kill", e))?;

        debug!("Recorded kill for user {} at {}", user_id, at);
        Ok(())
    }

    async fn remove_latest_kill(&self, user_id: UserId) -> Result<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM killa_kills
            WHERE id = (
                SELECT id FROM killa_kills
                WHERE user_id = ?
                ORDER BY timestamp DESC, id DESC
                LIMIT 1
            )
            ",
        )
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| KillaError::database_with_source("Failed to delete latest kill", e))?;

        let removed = result.rows_affected() > 0;
        debug!("Remove latest kill for user {}: removed={}", user_id, removed);
        Ok(removed)
    }

    async fn upsert_reset(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO killa_resets (user_id, reset_after)
            VALUES (?, ?)
            ON CONFLICT(user_id) DO UPDATE SET reset_after = excluded.reset_after
            ",
        )
        .bind(user_id.to_string())
        .bind(at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| KillaError::database_with_source("Failed to store reset marker", e))?;

        debug!("Reset marker for user {} set to {}", user_id, at);
        Ok(())
    }

    async fn kills(&self, user_id: UserId) -> Result<Vec<KillEvent>> {
        let rows = sqlx::query(
            "SELECT id, timestamp FROM killa_kills WHERE user_id = ? ORDER BY timestamp ASC, id ASC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| KillaError::database_with_source("Failed to load kills", e))?;

        rows.iter()
            .map(|row| -> Result<KillEvent> {
                let id: i64 = row
                    .try_get("id")
                    .map_err(|e| KillaError::database_with_source("Malformed kill row", e))?;
                let timestamp: i64 = row
                    .try_get("timestamp")
                    .map_err(|e| KillaError::database_with_source("Malformed kill row", e))?;
                Ok(KillEvent::new(id, user_id, from_millis(timestamp)?))
            })
            .collect()
    }

    async fn reset_marker(&self, user_id: UserId) -> Result<Option<ResetMarker>> {
        let reset_after: Option<i64> =
            sqlx::query_scalar("SELECT reset_after FROM killa_resets WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| KillaError::database_with_source("Failed to load reset marker", e))?;

        reset_after
            .map(|ms| from_millis(ms).map(|at| ResetMarker::new(user_id, at)))
            .transpose()
    }
}
