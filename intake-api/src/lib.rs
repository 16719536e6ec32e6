//! Intake API server
//!
//! REST surface for the legal-case intake pipeline.
//!
//! ## Endpoints
//!
//! - POST /api/v1/intake - Submit a complete intake (Bearer API key required)
//! - GET /health - Liveness probe
//! - GET /ready - Readiness probe (verifies database connectivity)

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::*;
pub use error::*;
pub use routes::*;
pub use server::*;
pub use state::*;
