//! Defendant repository

use chrono::{DateTime, Utc};
use intake_core::NormalizedDefendant;
use rusqlite::params;

use crate::entities::DefendantEntity;
use crate::error::DbResult;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct DefendantRepo {
    store: SqliteStore,
}

impl DefendantRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Insert all defendants of a submission, preserving array order as the
    /// 1-based `defendant_number`. `insurer_ids` carries the pre-resolved
    /// insurance-company id per defendant (same order). Related-defendant
    /// links are left NULL here and written by [`Self::set_related`] once
    /// real ids exist.
    pub fn insert_batch(
        &self,
        casefile_id: i64,
        defendants: &[NormalizedDefendant],
        insurer_ids: &[Option<i64>],
        now: DateTime<Utc>,
    ) -> DbResult<Vec<i64>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "INSERT INTO {} (casefile_id, defendant_number, first_name, last_name,
                                 business_name, street_address, city, state, zip_code,
                                 liability_percentage, insurance_company_id, policy_number,
                                 claim_number, adjuster_name, adjuster_email, adjuster_phone,
                                 relationship_type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
                DefendantEntity::TABLE
            ))?;

            let mut ids = Vec::with_capacity(defendants.len());
            for (index, defendant) in defendants.iter().enumerate() {
                stmt.execute(params![
                    casefile_id,
                    (index + 1) as i64,
                    defendant.first_name,
                    defendant.last_name,
                    defendant.business_name,
                    defendant.street_address,
                    defendant.city,
                    defendant.state,
                    defendant.zip_code,
                    defendant.liability_percentage,
                    insurer_ids.get(index).copied().flatten(),
                    defendant.policy_number,
                    defendant.claim_number,
                    defendant.adjuster_name,
                    defendant.adjuster_email,
                    defendant.adjuster_phone,
                    defendant.relationship_type,
                    now,
                ])?;
                ids.push(conn.last_insert_rowid());
            }
            Ok(ids)
        })
    }

    /// Second pass: link a defendant to another defendant of the same case.
    pub fn set_related(&self, id: i64, related_defendant_id: i64) -> DbResult<()> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "UPDATE {} SET related_defendant_id = ?1 WHERE id = ?2",
                    DefendantEntity::TABLE
                ),
                params![related_defendant_id, id],
            )?;
            Ok(())
        })
    }

    pub fn list_for_case(&self, casefile_id: i64) -> DbResult<Vec<DefendantEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE casefile_id = ?1 ORDER BY defendant_number",
                DefendantEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![casefile_id], DefendantEntity::from_row)?;
            rows.collect()
        })
    }
}
