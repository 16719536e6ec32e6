//! Work-log and usage-log repositories

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::entities::{UsageLogEntity, WorkLogEntity};
use crate::error::DbResult;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct WorkLogRepo {
    store: SqliteStore,
}

impl WorkLogRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub fn append(
        &self,
        casefile_id: Option<i64>,
        description: &str,
        author: &str,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (casefile_id, description, author, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    WorkLogEntity::TABLE
                ),
                params![casefile_id, description, author, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_for_case(&self, casefile_id: i64) -> DbResult<Vec<WorkLogEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE casefile_id = ?1 ORDER BY id",
                WorkLogEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![casefile_id], WorkLogEntity::from_row)?;
            rows.collect()
        })
    }
}

/// Insert form for a usage row.
#[derive(Debug, Clone)]
pub struct NewUsageLog {
    pub api_key_id: Option<i64>,
    pub endpoint: String,
    pub method: String,
    pub status_code: i64,
    pub duration_ms: i64,
    pub request_body: String,
    pub response_body: String,
    pub ip_address: String,
    pub user_agent: String,
}

#[derive(Clone)]
pub struct UsageLogRepo {
    store: SqliteStore,
}

impl UsageLogRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub fn record(&self, entry: &NewUsageLog, now: DateTime<Utc>) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (api_key_id, endpoint, method, status_code, duration_ms,
                                     request_body, response_body, ip_address, user_agent,
                                     created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    UsageLogEntity::TABLE
                ),
                params![
                    entry.api_key_id,
                    entry.endpoint,
                    entry.method,
                    entry.status_code,
                    entry.duration_ms,
                    entry.request_body,
                    entry.response_body,
                    entry.ip_address,
                    entry.user_agent,
                    now,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn recent(&self, limit: i64) -> DbResult<Vec<UsageLogEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} ORDER BY id DESC LIMIT ?1",
                UsageLogEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![limit], UsageLogEntity::from_row)?;
            rows.collect()
        })
    }
}
