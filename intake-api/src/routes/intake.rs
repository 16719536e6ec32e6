//! Intake submission endpoint
//!
//! The request passes through the pipeline in a fixed order: key validation,
//! rate limiting, payload validation, case-graph orchestration. The first
//! failing stage short-circuits the rest. Whatever the outcome, one usage
//! row is recorded as a spawned side effect so logging latency and logging
//! failures never reach the caller.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use intake_core::{validate_intake, FieldViolation, IntakeError};
use intake_db::{NewUsageLog, RateLimitDecision};
use tracing::info;

use crate::dto::{SubmitIntakeRequest, SubmitIntakeResponse};
use crate::error::{ApiError, X_RATE_LIMIT_REMAINING, X_RATE_LIMIT_RESET};
use crate::state::AppState;

const INTAKE_ENDPOINT: &str = "/api/v1/intake";

/// POST /api/v1/intake
pub async fn submit_intake(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let started = Instant::now();
    let now = Utc::now();

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let (api_key_id, result) = process(&state, authorization, &body, now).await;

    // Serialize the body once so the audit row records exactly what was sent.
    let (status, response_body, response) = match result {
        Ok((payload, decision)) => {
            let body_json = serde_json::to_string(&payload).unwrap_or_default();
            let mut response = (StatusCode::CREATED, Json(payload)).into_response();
            set_header(
                &mut response,
                X_RATE_LIMIT_REMAINING.clone(),
                decision.remaining.to_string(),
            );
            (StatusCode::CREATED, body_json, response)
        }
        Err(err) => {
            let reset = err.rate_limit_reset();
            let (status, envelope) = err.parts();
            let body_json = serde_json::to_string(&envelope).unwrap_or_default();
            let mut response = (status, Json(envelope)).into_response();
            if let Some(reset) = reset {
                set_header(&mut response, X_RATE_LIMIT_RESET.clone(), reset.to_string());
            }
            (status, body_json, response)
        }
    };

    record_usage(&state, &headers, api_key_id, status, started, body, response_body);

    response
}

/// Run the pipeline stages in order. The key id (once known) is returned
/// alongside the result so failures after authentication are still
/// attributed in the audit log.
async fn process(
    state: &AppState,
    authorization: Option<&str>,
    body: &str,
    now: DateTime<Utc>,
) -> (
    Option<i64>,
    Result<(SubmitIntakeResponse, RateLimitDecision), ApiError>,
) {
    let key = match state.keys.authenticate(authorization, now).await {
        Ok(key) => key,
        Err(err) => return (None, Err(err.into())),
    };
    let key_id = key.id;

    let decision = match state.rate_limits.check_and_count(&key, now).await {
        Ok(decision) => decision,
        Err(err) => return (Some(key_id), Err(err.into())),
    };

    let request: SubmitIntakeRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => {
            let violation = FieldViolation::new("body", format!("malformed JSON payload: {err}"));
            return (
                Some(key_id),
                Err(IntakeError::Validation(vec![violation]).into()),
            );
        }
    };

    let normalized = match validate_intake(&request.intake_data, now.date_naive()) {
        Ok(normalized) => normalized,
        Err(err) => return (Some(key_id), Err(err.into())),
    };

    match state.intake.submit(&normalized, now).await {
        Ok(outcome) => {
            info!(
                case_id = outcome.casefile_id,
                api_key_id = key_id,
                client_count = outcome.client_ids.len(),
                defendant_count = outcome.defendant_ids.len(),
                "intake submission accepted"
            );
            let message = format!(
                "Case created with {} client(s) and {} defendant(s)",
                outcome.client_ids.len(),
                outcome.defendant_ids.len()
            );
            let payload = SubmitIntakeResponse {
                success: true,
                casefile_id: outcome.casefile_id,
                clients: outcome.client_ids,
                defendants: outcome.defendant_ids,
                message,
            };
            (Some(key_id), Ok((payload, decision)))
        }
        Err(err) => (Some(key_id), Err(err.into())),
    }
}

fn record_usage(
    state: &AppState,
    headers: &HeaderMap,
    api_key_id: Option<i64>,
    status: StatusCode,
    started: Instant,
    request_body: String,
    response_body: String,
) {
    let entry = NewUsageLog {
        api_key_id,
        endpoint: INTAKE_ENDPOINT.to_string(),
        method: "POST".to_string(),
        status_code: status.as_u16() as i64,
        duration_ms: started.elapsed().as_millis() as i64,
        request_body,
        response_body,
        ip_address: header_or_unknown(headers, "x-forwarded-for"),
        user_agent: header_or_unknown(headers, "user-agent"),
    };

    let usage = state.usage.clone();
    tokio::spawn(async move {
        usage.record(entry).await;
    });
}

fn header_or_unknown(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

fn set_header(response: &mut Response, name: header::HeaderName, value: String) {
    if let Ok(value) = HeaderValue::from_str(&value) {
        response.headers_mut().insert(name, value);
    }
}
