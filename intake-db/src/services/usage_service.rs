//! API usage logging
//!
//! One row per API invocation, success or failure, with truncated bodies.
//! Recording is fire-and-forget: a logging failure is warned about and
//! swallowed so it can never mask the original response.

use chrono::Utc;
use intake_core::{IntakeError, IntakeResult};
use tracing::warn;

use crate::entities::UsageLogEntity;
use crate::repos::{NewUsageLog, UsageLogRepo};
use crate::store::SqliteStore;

/// Bodies are truncated to this many characters before persisting.
pub const MAX_BODY_LOG_CHARS: usize = 5_000;

pub struct UsageService {
    usage: UsageLogRepo,
}

impl UsageService {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            usage: UsageLogRepo::new(store),
        }
    }

    /// Record one invocation, best-effort.
    pub async fn record(&self, mut entry: NewUsageLog) {
        entry.request_body = truncate_body(&entry.request_body);
        entry.response_body = truncate_body(&entry.response_body);

        if let Err(error) = self.usage.record(&entry, Utc::now()) {
            warn!(
                operation = "usage_record",
                endpoint = %entry.endpoint,
                error = %error,
                "failed to record API usage"
            );
        }
    }

    /// Most recent usage rows, newest first.
    pub async fn recent(&self, limit: i64) -> IntakeResult<Vec<UsageLogEntity>> {
        self.usage
            .recent(limit)
            .map_err(|e| IntakeError::Database(e.to_string()))
    }
}

/// Truncate on a character boundary.
fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_LOG_CHARS {
        body.to_string()
    } else {
        body.chars().take(MAX_BODY_LOG_CHARS).collect()
    }
}
