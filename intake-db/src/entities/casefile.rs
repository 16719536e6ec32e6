//! Casefile entity

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::Serialize;

/// Root record of the intake graph.
#[derive(Debug, Clone, Serialize)]
pub struct CasefileEntity {
    pub id: i64,
    pub stage: String,
    pub status: String,
    pub date_of_loss: NaiveDate,
    pub accident_description: String,
    pub accident_city: String,
    pub accident_state: String,
    pub statute_deadline: NaiveDate,
    pub days_until_statute: i64,
    pub client_count: i64,
    pub defendant_count: i64,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl CasefileEntity {
    pub const TABLE: &'static str = "casefiles";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            stage: row.get("stage")?,
            status: row.get("status")?,
            date_of_loss: row.get("date_of_loss")?,
            accident_description: row.get("accident_description")?,
            accident_city: row.get("accident_city")?,
            accident_state: row.get("accident_state")?,
            statute_deadline: row.get("statute_deadline")?,
            days_until_statute: row.get("days_until_statute")?,
            client_count: row.get("client_count")?,
            defendant_count: row.get("defendant_count")?,
            is_archived: row.get("is_archived")?,
            created_at: row.get("created_at")?,
        })
    }
}
