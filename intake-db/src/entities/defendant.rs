//! Defendant entity

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

/// A defendant on a casefile, ordered by `defendant_number` (1-based).
///
/// `related_defendant_id` is a non-owning link to another defendant of the
/// same case (e.g. the spouse of defendant #1), written in a second pass
/// once the batch insert has produced real row ids.
#[derive(Debug, Clone, Serialize)]
pub struct DefendantEntity {
    pub id: i64,
    pub casefile_id: i64,
    pub defendant_number: i64,
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub liability_percentage: i64,
    pub insurance_company_id: Option<i64>,
    pub policy_number: String,
    pub claim_number: String,
    pub adjuster_name: String,
    pub adjuster_email: String,
    pub adjuster_phone: String,
    pub related_defendant_id: Option<i64>,
    pub relationship_type: String,
    pub created_at: DateTime<Utc>,
}

impl DefendantEntity {
    pub const TABLE: &'static str = "defendants";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            casefile_id: row.get("casefile_id")?,
            defendant_number: row.get("defendant_number")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            business_name: row.get("business_name")?,
            street_address: row.get("street_address")?,
            city: row.get("city")?,
            state: row.get("state")?,
            zip_code: row.get("zip_code")?,
            liability_percentage: row.get("liability_percentage")?,
            insurance_company_id: row.get("insurance_company_id")?,
            policy_number: row.get("policy_number")?,
            claim_number: row.get("claim_number")?,
            adjuster_name: row.get("adjuster_name")?,
            adjuster_email: row.get("adjuster_email")?,
            adjuster_phone: row.get("adjuster_phone")?,
            related_defendant_id: row.get("related_defendant_id")?,
            relationship_type: row.get("relationship_type")?,
            created_at: row.get("created_at")?,
        })
    }
}
