//! Per-key hourly rate limiting
//!
//! One persisted counter row per key per hour-aligned window. The check is
//! read-then-increment over the injected store; because the store serializes
//! statements behind its connection lock, the count is exact in-process. A
//! concurrent multi-writer store would need an atomic conditional upsert to
//! keep the same guarantee; the repository already expresses the increment
//! as a single UPSERT statement for that reason.
//!
//! Requests rejected over the limit are not counted.

use chrono::{DateTime, Duration, Timelike, Utc};
use intake_core::{IntakeError, IntakeResult};

use crate::entities::ApiKeyEntity;
use crate::repos::RateLimitRepo;
use crate::store::SqliteStore;

/// Outcome of an admitted request.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    /// Requests left in the current window after this one.
    pub remaining: i64,
    /// When the window (and the quota) resets.
    pub window_end: DateTime<Utc>,
}

pub struct RateLimitService {
    windows: RateLimitRepo,
}

impl RateLimitService {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            windows: RateLimitRepo::new(store),
        }
    }

    /// Admit or reject a request for `key` at instant `now`.
    pub async fn check_and_count(
        &self,
        key: &ApiKeyEntity,
        now: DateTime<Utc>,
    ) -> IntakeResult<RateLimitDecision> {
        let (window_start, window_end) = hour_window(now);

        let count = self
            .windows
            .current_count(key.id, window_start)
            .map_err(|e| IntakeError::Database(e.to_string()))?
            .unwrap_or(0);

        if count >= key.rate_limit_per_hour {
            return Err(IntakeError::RateLimitExceeded {
                limit: key.rate_limit_per_hour,
                reset_at: window_end,
            });
        }

        let new_count = self
            .windows
            .increment(key.id, window_start, window_end)
            .map_err(|e| IntakeError::Database(e.to_string()))?;

        Ok(RateLimitDecision {
            remaining: (key.rate_limit_per_hour - new_count).max(0),
            window_end,
        })
    }
}

/// The hour-aligned window containing `now`: `[floor(now, 1h), +1h)`.
pub fn hour_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    // hour() < 24, so and_hms_opt cannot fail; the fallback is unreachable.
    let start = now
        .date_naive()
        .and_hms_opt(now.hour(), 0, 0)
        .unwrap_or_else(|| now.naive_utc())
        .and_utc();
    (start, start + Duration::hours(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::ApiKeyRepo;
    use chrono::TimeZone;

    fn setup(limit: i64) -> (RateLimitService, ApiKeyEntity, RateLimitRepo) {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        let keys = ApiKeyRepo::new(store.clone());
        let id = keys.insert("test", "hash", limit, None, Utc::now()).unwrap();
        let key = keys.get(id).unwrap().unwrap();
        let repo = RateLimitRepo::new(store.clone());
        (RateLimitService::new(store), key, repo)
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_hour_window_is_hour_aligned() {
        let (start, end) = hour_window(at(14, 37));
        assert_eq!(start, at(14, 0));
        assert_eq!(end, at(15, 0));
    }

    #[tokio::test]
    async fn test_limit_boundary() {
        let (service, key, _repo) = setup(3);
        let now = at(10, 5);

        // The L-th request succeeds...
        for expected_remaining in [2, 1, 0] {
            let decision = service.check_and_count(&key, now).await.unwrap();
            assert_eq!(decision.remaining, expected_remaining);
        }

        // ...and the (L+1)-th fails with the window end as reset time.
        let err = service.check_and_count(&key, now).await.unwrap_err();
        match err {
            IntakeError::RateLimitExceeded { limit, reset_at } => {
                assert_eq!(limit, 3);
                assert_eq!(reset_at, at(11, 0));
            }
            other => panic!("expected rate limit error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejected_requests_are_not_counted() {
        let (service, key, repo) = setup(1);
        let now = at(10, 5);

        service.check_and_count(&key, now).await.unwrap();
        service.check_and_count(&key, now).await.unwrap_err();
        service.check_and_count(&key, now).await.unwrap_err();

        let windows = repo.list_for_key(key.id).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].request_count, 1);
    }

    #[tokio::test]
    async fn test_new_window_resets_quota() {
        let (service, key, repo) = setup(1);

        service.check_and_count(&key, at(10, 59)).await.unwrap();
        service.check_and_count(&key, at(10, 59)).await.unwrap_err();

        // Next hour window admits again; one row per key per hour.
        let decision = service.check_and_count(&key, at(11, 0)).await.unwrap();
        assert_eq!(decision.remaining, 0);
        assert_eq!(repo.list_for_key(key.id).unwrap().len(), 2);
    }
}
