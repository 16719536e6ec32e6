//! Intake Database Layer
//!
//! SQLite persistence for the intake pipeline: schema, row entities,
//! repositories, and the services that implement the core pipeline
//! components (key validation, rate limiting, reference resolution, the
//! case-graph orchestrator, usage logging).
//!
//! The store object is passed explicitly into every repository and service;
//! there is no ambient singleton connection. Only per-statement atomicity is
//! relied on: the orchestrator never opens a multi-statement transaction.

pub mod entities;
pub mod error;
pub mod repos;
pub mod schema;
pub mod services;
pub mod store;

pub use entities::*;
pub use error::{DbError, DbResult};
pub use repos::*;
pub use schema::INTAKE_SCHEMA;
pub use services::{
    hash_secret, IntakeOutcome, IntakeService, KeyService, RateLimitDecision, RateLimitService,
    ReferenceService, ReferenceTarget, UsageService,
};
pub use store::SqliteStore;
