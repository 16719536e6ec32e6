//! API route handlers

pub mod health;
pub mod intake;

use axum::{routing::get, routing::post, Router};

use crate::state::AppState;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Intake endpoint
        .route("/api/v1/intake", post(intake::submit_intake))
        // State
        .with_state(state)
}
