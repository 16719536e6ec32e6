//! Intake Core
//!
//! Domain types, error taxonomy and payload validation for the legal-case
//! intake pipeline. This crate is storage- and transport-agnostic: the
//! database layer (`intake-db`) and the HTTP layer (`intake-api`) both build
//! on the types defined here.

pub mod error;
pub mod logging;
pub mod types;
pub mod validation;

pub use error::{FieldViolation, IntakeError, IntakeResult};
pub use types::case::{days_until, statute_deadline, CaseStage, CaseStatus};
pub use types::intake::{ClientIntake, DefendantIntake, IntakeData, ProviderSelection};
pub use types::normalized::{NormalizedClient, NormalizedDefendant, NormalizedIntake};
pub use types::reference::{RawReference, Reference};
pub use validation::validate_intake;
