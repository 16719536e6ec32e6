//! Repository layer
//!
//! One repository per aggregate; each holds a store handle and keeps its SQL
//! local. Services compose repositories, never raw connections.

pub mod api_key_repo;
pub mod casefile_repo;
pub mod claim_repo;
pub mod client_repo;
pub mod company_repo;
pub mod defendant_repo;
pub mod log_repo;
pub mod rate_limit_repo;

pub use api_key_repo::ApiKeyRepo;
pub use casefile_repo::{CasefileRepo, NewCasefile};
pub use claim_repo::ClaimRepo;
pub use client_repo::ClientRepo;
pub use company_repo::CompanyRepo;
pub use defendant_repo::DefendantRepo;
pub use log_repo::{NewUsageLog, UsageLogRepo, WorkLogRepo};
pub use rate_limit_repo::RateLimitRepo;
