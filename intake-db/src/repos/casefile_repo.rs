//! Casefile repository

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};

use crate::entities::CasefileEntity;
use crate::error::DbResult;
use crate::store::SqliteStore;

/// Insert form for a new casefile.
#[derive(Debug, Clone)]
pub struct NewCasefile {
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
}

#[derive(Clone)]
pub struct CasefileRepo {
    store: SqliteStore,
}

impl CasefileRepo {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub fn insert(&self, casefile: &NewCasefile, now: DateTime<Utc>) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.execute(
                &format!(
                    "INSERT INTO {} (stage, status, date_of_loss, accident_description,
                                     accident_city, accident_state, statute_deadline,
                                     days_until_statute, client_count, defendant_count,
                                     is_archived, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, ?11)",
                    CasefileEntity::TABLE
                ),
                params![
                    casefile.stage,
                    casefile.status,
                    casefile.date_of_loss,
                    casefile.accident_description,
                    casefile.accident_city,
                    casefile.accident_state,
                    casefile.statute_deadline,
                    casefile.days_until_statute,
                    casefile.client_count,
                    casefile.defendant_count,
                    now,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get(&self, id: i64) -> DbResult<Option<CasefileEntity>> {
        self.store.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT * FROM {} WHERE id = ?1", CasefileEntity::TABLE),
                params![id],
                CasefileEntity::from_row,
            )
            .optional()
        })
    }

    pub fn count(&self) -> DbResult<i64> {
        self.store.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", CasefileEntity::TABLE),
                [],
                |row| row.get(0),
            )
        })
    }
}
