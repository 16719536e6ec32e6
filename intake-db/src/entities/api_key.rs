//! API key and rate-limit window entities

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

/// A machine API credential. Only the SHA-256 hash of the secret is stored.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyEntity {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub key_hash: String,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub rate_limit_per_hour: i64,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ApiKeyEntity {
    pub const TABLE: &'static str = "api_keys";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            key_hash: row.get("key_hash")?,
            is_active: row.get("is_active")?,
            expires_at: row.get("expires_at")?,
            rate_limit_per_hour: row.get("rate_limit_per_hour")?,
            last_used_at: row.get("last_used_at")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// One hour-aligned request-count bucket for a key.
#[derive(Debug, Clone, Serialize)]
pub struct RateLimitWindowEntity {
    pub id: i64,
    pub api_key_id: i64,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub request_count: i64,
}

impl RateLimitWindowEntity {
    pub const TABLE: &'static str = "rate_limit_windows";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            api_key_id: row.get("api_key_id")?,
            window_start: row.get("window_start")?,
            window_end: row.get("window_end")?,
            request_count: row.get("request_count")?,
        })
    }
}
