//! API key repository

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::entities::ApiKeyEntity;
use crate::error::DbResult;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct ApiKeyRepo {
    store: SqliteStore,
}

impl ApiKeyRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Insert a new key record; only the hash of the secret is persisted.
    pub fn insert(
        &self,
        name: &str,
        key_hash: &str,
        rate_limit_per_hour: i64,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (name, key_hash, is_active, expires_at, rate_limit_per_hour, created_at)
                     VALUES (?1, ?2, 1, ?3, ?4, ?5)",
                    ApiKeyEntity::TABLE
                ),
                params![name, key_hash, expires_at, rate_limit_per_hour, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Look up a key by the hash of a presented secret.
    pub fn find_by_hash(&self, key_hash: &str) -> DbResult<Option<ApiKeyEntity>> {
        self.store.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT * FROM {} WHERE key_hash = ?1 LIMIT 1",
                    ApiKeyEntity::TABLE
                ),
                params![key_hash],
                ApiKeyEntity::from_row,
            )
            .optional()
        })
    }

    /// Record that the key was just used.
    pub fn touch_last_used(&self, id: i64, now: DateTime<Utc>) -> DbResult<()> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "UPDATE {} SET last_used_at = ?1 WHERE id = ?2",
                    ApiKeyEntity::TABLE
                ),
                params![now, id],
            )?;
            Ok(())
        })
    }

    pub fn set_active(&self, id: i64, is_active: bool) -> DbResult<()> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!("UPDATE {} SET is_active = ?1 WHERE id = ?2", ApiKeyEntity::TABLE),
                params![is_active, id],
            )?;
            Ok(())
        })
    }

    pub fn list(&self) -> DbResult<Vec<ApiKeyEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} ORDER BY id",
                ApiKeyEntity::TABLE
            ))?;
            let rows = stmt.query_map([], ApiKeyEntity::from_row)?;
            rows.collect()
        })
    }

    pub fn get(&self, id: i64) -> DbResult<Option<ApiKeyEntity>> {
        self.store.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT * FROM {} WHERE id = ?1", ApiKeyEntity::TABLE),
                params![id],
                ApiKeyEntity::from_row,
            )
            .optional()
        })
    }
}
