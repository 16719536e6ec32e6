//! Data Transfer Objects for API requests and responses

use intake_core::IntakeData;
use serde::{Deserialize, Serialize};

/// Intake submission request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIntakeRequest {
    /// The wizard payload
    pub intake_data: IntakeData,
    /// Accepted for forward compatibility; not processed here.
    #[serde(default)]
    pub documents: Option<serde_json::Value>,
}

/// Successful intake response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitIntakeResponse {
    pub success: bool,
    pub casefile_id: i64,
    /// Created client row ids, in submission order
    pub clients: Vec<i64>,
    /// Created defendant row ids, in submission order
    pub defendants: Vec<i64>,
    pub message: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
