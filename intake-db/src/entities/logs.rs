//! Work-log and usage-log entities

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

/// A free-text activity entry, attached to a case or system-wide.
#[derive(Debug, Clone, Serialize)]
pub struct WorkLogEntity {
    pub id: i64,
    pub casefile_id: Option<i64>,
    pub description: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl WorkLogEntity {
    pub const TABLE: &'static str = "work_log";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            casefile_id: row.get("casefile_id")?,
            description: row.get("description")?,
            author: row.get("author")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// One API invocation record, written regardless of outcome.
#[derive(Debug, Clone, Serialize)]
pub struct UsageLogEntity {
    pub id: i64,
    pub api_key_id: Option<i64>,
    pub endpoint: String,
    pub method: String,
    pub status_code: i64,
    pub duration_ms: i64,
    pub request_body: String,
    pub response_body: String,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl UsageLogEntity {
    pub const TABLE: &'static str = "usage_logs";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            api_key_id: row.get("api_key_id")?,
            endpoint: row.get("endpoint")?,
            method: row.get("method")?,
            status_code: row.get("status_code")?,
            duration_ms: row.get("duration_ms")?,
            request_body: row.get("request_body")?,
            response_body: row.get("response_body")?,
            ip_address: row.get("ip_address")?,
            user_agent: row.get("user_agent")?,
            created_at: row.get("created_at")?,
        })
    }
}
