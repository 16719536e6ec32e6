//! Row entities for the intake schema
//!
//! One struct per table, each with a `TABLE` const and a `from_row` mapper.

pub mod api_key;
pub mod casefile;
pub mod claims;
pub mod client;
pub mod company;
pub mod defendant;
pub mod logs;

pub use api_key::{ApiKeyEntity, RateLimitWindowEntity};
pub use casefile::CasefileEntity;
pub use claims::{
    FirstPartyClaimEntity, HealthClaimEntity, MedicalBillEntity, ThirdPartyClaimEntity,
};
pub use client::ClientEntity;
pub use company::{InsuranceCompanyEntity, MedicalProviderEntity};
pub use defendant::DefendantEntity;
pub use logs::{UsageLogEntity, WorkLogEntity};
