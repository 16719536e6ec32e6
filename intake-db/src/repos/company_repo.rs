//! Insurance-company / medical-provider repository

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::entities::{InsuranceCompanyEntity, MedicalProviderEntity};
use crate::error::DbResult;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct CompanyRepo {
    store: SqliteStore,
}

impl CompanyRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Insert a minimal insurance-company row (`company_type` is `auto` or
    /// `health`); all other fields default.
    pub fn insert_company(
        &self,
        name: &str,
        company_type: &str,
        now: DateTime<Utc>,
    ) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (name, company_type, created_at) VALUES (?1, ?2, ?3)",
                    InsuranceCompanyEntity::TABLE
                ),
                params![name, company_type, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Insert a minimal medical-provider row.
    pub fn insert_provider(&self, name: &str, now: DateTime<Utc>) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (name, created_at) VALUES (?1, ?2)",
                    MedicalProviderEntity::TABLE
                ),
                params![name, now],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_company(&self, id: i64) -> DbResult<Option<InsuranceCompanyEntity>> {
        self.store.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT * FROM {} WHERE id = ?1", InsuranceCompanyEntity::TABLE),
                params![id],
                InsuranceCompanyEntity::from_row,
            )
            .optional()
        })
    }

    pub fn get_provider(&self, id: i64) -> DbResult<Option<MedicalProviderEntity>> {
        self.store.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT * FROM {} WHERE id = ?1", MedicalProviderEntity::TABLE),
                params![id],
                MedicalProviderEntity::from_row,
            )
            .optional()
        })
    }
}
