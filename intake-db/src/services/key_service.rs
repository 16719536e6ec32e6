//! API-key validation
//!
//! Extracts the bearer token from the `Authorization` value, hashes it and
//! looks the hash up among stored keys. Active and expiry checks happen
//! here; the last-used timestamp update is spawned best-effort so a failure
//! to record it never fails the request.

use chrono::{DateTime, Utc};
use intake_core::{IntakeError, IntakeResult};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::entities::ApiKeyEntity;
use crate::repos::ApiKeyRepo;
use crate::store::SqliteStore;

/// Shortest credential we accept; anything shorter is rejected as malformed
/// before touching storage.
pub const MIN_TOKEN_LENGTH: usize = 20;

/// SHA-256 hex digest of an API-key secret.
pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

pub struct KeyService {
    keys: ApiKeyRepo,
}

impl KeyService {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            keys: ApiKeyRepo::new(store),
        }
    }

    /// Validate a raw `Authorization` header value.
    ///
    /// Returns the key record (with its configured hourly limit) on success.
    /// All failure modes surface as `IntakeError::Authentication` except
    /// storage faults, which are database errors.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> IntakeResult<ApiKeyEntity> {
        let token = parse_bearer(authorization)?;

        let key = self
            .keys
            .find_by_hash(&hash_secret(token))
            .map_err(|e| IntakeError::Database(e.to_string()))?
            .ok_or_else(|| IntakeError::Authentication("invalid API key".to_string()))?;

        if !key.is_active {
            return Err(IntakeError::Authentication("API key is inactive".to_string()));
        }
        if let Some(expires_at) = key.expires_at {
            if expires_at < now {
                return Err(IntakeError::Authentication("API key expired".to_string()));
            }
        }

        // Best-effort: a failed touch must not fail the request.
        let repo = self.keys.clone();
        let key_id = key.id;
        tokio::spawn(async move {
            if let Err(error) = repo.touch_last_used(key_id, now) {
                warn!(api_key_id = key_id, error = %error, "failed to update key last-used timestamp");
            }
        });

        Ok(key)
    }
}

fn parse_bearer(authorization: Option<&str>) -> IntakeResult<&str> {
    let header = authorization
        .ok_or_else(|| IntakeError::Authentication("missing Authorization header".to_string()))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            IntakeError::Authentication("malformed Authorization header, expected Bearer token".to_string())
        })?
        .trim();
    if token.len() < MIN_TOKEN_LENGTH {
        return Err(IntakeError::Authentication("API key too short".to_string()));
    }
    Ok(token)
}
