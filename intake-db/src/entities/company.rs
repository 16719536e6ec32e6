//! Insurance-company and medical-provider entities

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct InsuranceCompanyEntity {
    pub id: i64,
    pub name: String,
    /// `auto` or `health`
    pub company_type: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl InsuranceCompanyEntity {
    pub const TABLE: &'static str = "insurance_companies";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            company_type: row.get("company_type")?,
            phone: row.get("phone")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicalProviderEntity {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl MedicalProviderEntity {
    pub const TABLE: &'static str = "medical_providers";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            phone: row.get("phone")?,
            created_at: row.get("created_at")?,
        })
    }
}
