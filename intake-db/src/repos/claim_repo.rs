//! Claim and medical-bill repository

use chrono::{DateTime, Utc};
use rusqlite::params;

use crate::entities::{
    FirstPartyClaimEntity, HealthClaimEntity, MedicalBillEntity, ThirdPartyClaimEntity,
};
use crate::error::DbResult;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct ClaimRepo {
    store: SqliteStore,
}

impl ClaimRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub fn insert_first_party(
        &self,
        client_id: i64,
        insurance_company_id: i64,
        policy_number: &str,
        pip_available: f64,
        pip_used: f64,
        medpay_available: f64,
        medpay_used: f64,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (client_id, insurance_company_id, policy_number,
                                     pip_available, pip_used, medpay_available, medpay_used,
                                     created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    FirstPartyClaimEntity::TABLE
                ),
                params![
                    client_id,
                    insurance_company_id,
                    policy_number,
                    pip_available,
                    pip_used,
                    medpay_available,
                    medpay_used,
                    now,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn insert_third_party(
        &self,
        defendant_id: i64,
        insurance_company_id: i64,
        claim_number: &str,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (defendant_id, insurance_company_id, claim_number, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    ThirdPartyClaimEntity::TABLE
                ),
                params![defendant_id, insurance_company_id, claim_number, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn insert_health(
        &self,
        client_id: i64,
        insurance_company_id: i64,
        member_id: &str,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (client_id, insurance_company_id, member_id, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    HealthClaimEntity::TABLE
                ),
                params![client_id, insurance_company_id, member_id, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Insert a medical-bill stub with every financial/status field zeroed.
    pub fn insert_medical_bill(
        &self,
        client_id: i64,
        provider_id: i64,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (client_id, provider_id, created_at) VALUES (?1, ?2, ?3)",
                    MedicalBillEntity::TABLE
                ),
                params![client_id, provider_id, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn first_party_for_client(&self, client_id: i64) -> DbResult<Vec<FirstPartyClaimEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE client_id = ?1",
                FirstPartyClaimEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![client_id], FirstPartyClaimEntity::from_row)?;
            rows.collect()
        })
    }

    pub fn third_party_for_defendant(
        &self,
        defendant_id: i64,
    ) -> DbResult<Vec<ThirdPartyClaimEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE defendant_id = ?1",
                ThirdPartyClaimEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![defendant_id], ThirdPartyClaimEntity::from_row)?;
            rows.collect()
        })
    }

    pub fn health_claims_for_client(&self, client_id: i64) -> DbResult<Vec<HealthClaimEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE client_id = ?1",
                HealthClaimEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![client_id], HealthClaimEntity::from_row)?;
            rows.collect()
        })
    }

    pub fn bills_for_client(&self, client_id: i64) -> DbResult<Vec<MedicalBillEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE client_id = ?1",
                MedicalBillEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![client_id], MedicalBillEntity::from_row)?;
            rows.collect()
        })
    }
}
