//! Temporary-reference resolution
//!
//! Turns a [`Reference`] into a real row id for one of three target
//! collections. `Existing` ids pass through unchanged (referential validity
//! is left to foreign-key enforcement at the insert that uses them);
//! `Pending` markers materialize a minimal row and return its id.
//!
//! Resolution is invoked independently per reference encountered during
//! orchestration; identical pending markers in different payload locations
//! intentionally produce distinct rows.

use chrono::{DateTime, Utc};
use intake_core::{IntakeError, IntakeResult, Reference};
use tracing::debug;

use crate::repos::CompanyRepo;
use crate::store::SqliteStore;

/// Which collection a reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTarget {
    AutoInsurance,
    HealthInsurance,
    MedicalProvider,
}

impl ReferenceTarget {
    /// Name given to a materialized row when the payload carried none.
    pub fn default_name(&self) -> &'static str {
        match self {
            Self::AutoInsurance => "New Auto Insurance",
            Self::HealthInsurance => "New Health Insurance",
            Self::MedicalProvider => "New Medical Provider",
        }
    }

    fn company_type(&self) -> &'static str {
        match self {
            Self::AutoInsurance => "auto",
            Self::HealthInsurance => "health",
            Self::MedicalProvider => "provider",
        }
    }
}

pub struct ReferenceService {
    companies: CompanyRepo,
}

impl ReferenceService {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            companies: CompanyRepo::new(store),
        }
    }

    /// Resolve a reference against `target`, returning a stable row id.
    pub async fn resolve(
        &self,
        reference: &Reference,
        target: ReferenceTarget,
        now: DateTime<Utc>,
    ) -> IntakeResult<i64> {
        match reference {
            Reference::Existing(id) => Ok(*id),
            Reference::Pending(name) => {
                let name = name.as_deref().unwrap_or_else(|| target.default_name());
                let id = match target {
                    ReferenceTarget::MedicalProvider => self.companies.insert_provider(name, now),
                    ReferenceTarget::AutoInsurance | ReferenceTarget::HealthInsurance => self
                        .companies
                        .insert_company(name, target.company_type(), now),
                }
                .map_err(|e| IntakeError::Database(e.to_string()))?;

                debug!(
                    operation = "reference_resolve",
                    target = target.company_type(),
                    id,
                    "materialized pending reference"
                );
                Ok(id)
            }
        }
    }
}
