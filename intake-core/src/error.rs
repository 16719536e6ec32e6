//! Error types for the intake pipeline
//!
//! The taxonomy mirrors the API failure contract: authentication and rate
//! limiting short-circuit before any write, validation enumerates every
//! violation found, and orchestration failures carry the originating step
//! in their message.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// A single validation violation, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field path, e.g. `clients[0].dateOfBirth`
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Intake pipeline errors
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded: {limit} requests per hour")]
    RateLimitExceeded {
        /// The key's configured hourly limit
        limit: i64,
        /// End of the current hour window, when the quota resets
        reset_at: DateTime<Utc>,
    },

    #[error("Validation failed with {} violation(s)", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    /// Stable machine-readable error code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "AUTHENTICATION_ERROR",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for intake operations
pub type IntakeResult<T> = Result<T, IntakeError>;
