//! API error types
//!
//! Every failure leaves the server as `{ success: false, error: { code,
//! message, details? } }`. The status and code come from the underlying
//! [`IntakeError`] taxonomy; rate-limit rejections additionally carry an
//! `X-RateLimit-Reset` header with the epoch second the quota returns.

use axum::{
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use intake_core::{FieldViolation, IntakeError};
use serde::Serialize;
use thiserror::Error;

pub static X_RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub static X_RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// The `error` object of a failure envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

impl ApiError {
    /// Status code plus serialized failure envelope.
    pub fn parts(&self) -> (StatusCode, ErrorResponse) {
        let (status, code, message, details) = match self {
            ApiError::Intake(err) => match err {
                IntakeError::Authentication(msg) => {
                    (StatusCode::UNAUTHORIZED, err.code(), msg.clone(), None)
                }
                IntakeError::RateLimitExceeded { .. } => (
                    StatusCode::TOO_MANY_REQUESTS,
                    err.code(),
                    err.to_string(),
                    None,
                ),
                IntakeError::Validation(violations) => (
                    StatusCode::BAD_REQUEST,
                    err.code(),
                    "Request validation failed".to_string(),
                    Some(violations.clone()),
                ),
                IntakeError::Database(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.code(),
                    msg.clone(),
                    None,
                ),
                IntakeError::Internal(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.code(),
                    msg.clone(),
                    None,
                ),
            },
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
                None,
            ),
        };

        (
            status,
            ErrorResponse {
                success: false,
                error: ErrorBody {
                    code: code.to_string(),
                    message,
                    details,
                },
            },
        )
    }

    /// Epoch second at which a rejected caller may retry, for 429 responses.
    pub fn rate_limit_reset(&self) -> Option<i64> {
        match self {
            ApiError::Intake(IntakeError::RateLimitExceeded { reset_at, .. }) => {
                Some(reset_at.timestamp())
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let reset = self.rate_limit_reset();
        let (status, body) = self.parts();
        let mut response = (status, Json(body)).into_response();
        if let Some(reset) = reset {
            if let Ok(value) = HeaderValue::from_str(&reset.to_string()) {
                response
                    .headers_mut()
                    .insert(X_RATE_LIMIT_RESET.clone(), value);
            }
        }
        response
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
