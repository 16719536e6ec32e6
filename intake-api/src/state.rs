//! Application state for the API server

use std::sync::Arc;

use intake_core::{IntakeError, IntakeResult};
use intake_db::{IntakeService, KeyService, RateLimitService, SqliteStore, UsageService};

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// API-key validation
    pub keys: Arc<KeyService>,
    /// Per-key hourly rate limiting
    pub rate_limits: Arc<RateLimitService>,
    /// Case-graph orchestration
    pub intake: Arc<IntakeService>,
    /// Usage audit logging
    pub usage: Arc<UsageService>,
    /// Direct store handle (readiness probe)
    pub store: SqliteStore,
    /// API version
    pub version: String,
}

impl AppState {
    /// Create app state from a store, initializing the schema.
    pub fn new(store: SqliteStore) -> IntakeResult<Self> {
        store
            .init_schema()
            .map_err(|e| IntakeError::Database(e.to_string()))?;

        Ok(Self {
            keys: Arc::new(KeyService::new(store.clone())),
            rate_limits: Arc::new(RateLimitService::new(store.clone())),
            intake: Arc::new(IntakeService::new(store.clone())),
            usage: Arc::new(UsageService::new(store.clone())),
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
        }
    }
}
