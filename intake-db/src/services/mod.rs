//! Pipeline services
//!
//! Each service composes repositories and implements one component of the
//! intake pipeline: key validation, rate limiting, reference resolution,
//! the case-graph orchestrator, and usage logging.

pub mod intake_service;
pub mod key_service;
pub mod rate_limit_service;
pub mod reference_service;
pub mod usage_service;

pub use intake_service::{IntakeOutcome, IntakeService};
pub use key_service::{hash_secret, KeyService};
pub use rate_limit_service::{RateLimitDecision, RateLimitService};
pub use reference_service::{ReferenceService, ReferenceTarget};
pub use usage_service::UsageService;
