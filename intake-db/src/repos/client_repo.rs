//! Client repository

use chrono::{DateTime, Utc};
use intake_core::NormalizedClient;
use rusqlite::params;

use crate::entities::ClientEntity;
use crate::error::DbResult;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct ClientRepo {
    store: SqliteStore,
}

impl ClientRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Insert all clients of a submission, preserving array order as the
    /// 1-based `client_number`. Returns row ids in the same order.
    pub fn insert_batch(
        &self,
        casefile_id: i64,
        clients: &[NormalizedClient],
        now: DateTime<Utc>,
    ) -> DbResult<Vec<i64>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "INSERT INTO {} (casefile_id, client_number, first_name, last_name,
                                 date_of_birth, street_address, city, state, zip_code,
                                 primary_phone, secondary_phone, email, ssn_last_four,
                                 marital_status, employer_name, is_driver,
                                 medical_history, injuries_description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
                ClientEntity::TABLE
            ))?;

            let mut ids = Vec::with_capacity(clients.len());
            for (index, client) in clients.iter().enumerate() {
                stmt.execute(params![
                    casefile_id,
                    (index + 1) as i64,
                    client.first_name,
                    client.last_name,
                    client.date_of_birth,
                    client.street_address,
                    client.city,
                    client.state,
                    client.zip_code,
                    client.primary_phone,
                    client.secondary_phone,
                    client.email,
                    client.ssn_last_four,
                    client.marital_status,
                    client.employer_name,
                    client.is_driver,
                    client.medical_history,
                    client.injuries_description,
                    now,
                ])?;
                ids.push(conn.last_insert_rowid());
            }
            Ok(ids)
        })
    }

    pub fn list_for_case(&self, casefile_id: i64) -> DbResult<Vec<ClientEntity>> {
        self.store.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT * FROM {} WHERE casefile_id = ?1 ORDER BY client_number",
                ClientEntity::TABLE
            ))?;
            let rows = stmt.query_map(params![casefile_id], ClientEntity::from_row)?;
            rows.collect()
        })
    }
}
