//! Rate-limit window repository

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::entities::RateLimitWindowEntity;
use crate::error::DbResult;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct RateLimitRepo {
    store: SqliteStore,
}

impl RateLimitRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Request count in the window starting at `window_start`, or `None` if
    /// no row exists yet.
    pub fn current_count(&self, api_key_id: i64, window_start: DateTime<Utc>) -> DbResult<Option<i64>> {
        self.store.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT request_count FROM {} WHERE api_key_id = ?1 AND window_start = ?2",
                    RateLimitWindowEntity::TABLE
                ),
                params![api_key_id, window_start],
                |row| row.get(0),
            )
            .optional()
        })
    }

    /// Count one request in the window, creating the row on first use.
    /// Returns the post-increment count.
    pub fn increment(
        &self,
        api_key_id: i64,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (api_key_id, window_start, window_end, request_count)
                     VALUES (?1, ?2, ?3, 1)
                     ON CONFLICT (api_key_id, window_start)
                     DO UPDATE SET request_count = request_count + 1",
                    RateLimitWindowEntity::TABLE
                ),
                params![api_key_id, window_start, window_end],
            )?;
            conn.query_row(
                &format!(
                    "SELECT request_count FROM {} WHERE api_key_id = ?1 AND window_start = ?2",
                    RateLimitWindowEntity::TABLE
                ),
                params![api_key_id, window_start],
                |row| row.get(0),
            )
        })
    }

    /// All windows recorded for a key (diagnostics and tests).
    pub fn list_for_key(&self, api_key_id: i64) -> DbResult<Vec<RateLimitWindowEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE api_key_id = ?1 ORDER BY window_start",
                RateLimitWindowEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![api_key_id], RateLimitWindowEntity::from_row)?;
            rows.collect()
        })
    }
}
