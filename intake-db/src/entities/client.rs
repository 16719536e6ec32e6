//! Client entity

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::Serialize;

/// A client on a casefile, ordered by `client_number` (1-based).
#[derive(Debug, Clone, Serialize)]
pub struct ClientEntity {
    pub id: i64,
    pub casefile_id: i64,
    pub client_number: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub primary_phone: String,
    pub secondary_phone: String,
    pub email: String,
    pub ssn_last_four: String,
    pub marital_status: String,
    pub employer_name: String,
    pub is_driver: bool,
    pub medical_history: String,
    pub injuries_description: String,
    pub created_at: DateTime<Utc>,
}

impl ClientEntity {
    pub const TABLE: &'static str = "clients";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            casefile_id: row.get("casefile_id")?,
            client_number: row.get("client_number")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            date_of_birth: row.get("date_of_birth")?,
            street_address: row.get("street_address")?,
            city: row.get("city")?,
            state: row.get("state")?,
            zip_code: row.get("zip_code")?,
            primary_phone: row.get("primary_phone")?,
            secondary_phone: row.get("secondary_phone")?,
            email: row.get("email")?,
            ssn_last_four: row.get("ssn_last_four")?,
            marital_status: row.get("marital_status")?,
            employer_name: row.get("employer_name")?,
            is_driver: row.get("is_driver")?,
            medical_history: row.get("medical_history")?,
            injuries_description: row.get("injuries_description")?,
            created_at: row.get("created_at")?,
        })
    }
}
