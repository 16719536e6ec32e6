//! Claim and medical-bill entities

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Serialize;

/// A claim a client makes against their own auto policy.
#[derive(Debug, Clone, Serialize)]
pub struct FirstPartyClaimEntity {
    pub id: i64,
    pub client_id: i64,
    pub insurance_company_id: i64,
    pub policy_number: String,
    pub pip_available: f64,
    pub pip_used: f64,
    pub medpay_available: f64,
    pub medpay_used: f64,
    pub created_at: DateTime<Utc>,
}

impl FirstPartyClaimEntity {
    pub const TABLE: &'static str = "first_party_claims";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            client_id: row.get("client_id")?,
            insurance_company_id: row.get("insurance_company_id")?,
            policy_number: row.get("policy_number")?,
            pip_available: row.get("pip_available")?,
            pip_used: row.get("pip_used")?,
            medpay_available: row.get("medpay_available")?,
            medpay_used: row.get("medpay_used")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A claim made against a defendant's policy.
#[derive(Debug, Clone, Serialize)]
pub struct ThirdPartyClaimEntity {
    pub id: i64,
    pub defendant_id: i64,
    pub insurance_company_id: i64,
    pub claim_number: String,
    /// Letter of representation sent
    pub lor_sent: bool,
    /// Letter of authority received
    pub loa_received: bool,
    pub amount_claimed: f64,
    pub amount_settled: f64,
    pub created_at: DateTime<Utc>,
}

impl ThirdPartyClaimEntity {
    pub const TABLE: &'static str = "third_party_claims";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            defendant_id: row.get("defendant_id")?,
            insurance_company_id: row.get("insurance_company_id")?,
            claim_number: row.get("claim_number")?,
            lor_sent: row.get("lor_sent")?,
            loa_received: row.get("loa_received")?,
            amount_claimed: row.get("amount_claimed")?,
            amount_settled: row.get("amount_settled")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A client's health-insurance claim.
#[derive(Debug, Clone, Serialize)]
pub struct HealthClaimEntity {
    pub id: i64,
    pub client_id: i64,
    pub insurance_company_id: i64,
    pub member_id: String,
    pub created_at: DateTime<Utc>,
}

impl HealthClaimEntity {
    pub const TABLE: &'static str = "health_claims";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            client_id: row.get("client_id")?,
            insurance_company_id: row.get("insurance_company_id")?,
            member_id: row.get("member_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A medical-bill stub: one row per provider selected for a client, with all
/// financial and status fields zeroed at creation.
#[derive(Debug, Clone, Serialize)]
pub struct MedicalBillEntity {
    pub id: i64,
    pub client_id: i64,
    pub provider_id: i64,
    pub billed_amount: f64,
    pub paid_amount: f64,
    pub adjusted_amount: f64,
    pub outstanding_amount: f64,
    pub is_resolved: bool,
    pub records_requested: bool,
    pub records_received: bool,
    pub created_at: DateTime<Utc>,
}

impl MedicalBillEntity {
    pub const TABLE: &'static str = "medical_bills";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            client_id: row.get("client_id")?,
            provider_id: row.get("provider_id")?,
            billed_amount: row.get("billed_amount")?,
            paid_amount: row.get("paid_amount")?,
            adjusted_amount: row.get("adjusted_amount")?,
            outstanding_amount: row.get("outstanding_amount")?,
            is_resolved: row.get("is_resolved")?,
            records_requested: row.get("records_requested")?,
            records_received: row.get("records_received")?,
            created_at: row.get("created_at")?,
        })
    }
}
