//! Logging conventions for the intake pipeline
//!
//! All modules log through `tracing` with structured fields. Use these
//! constants instead of ad-hoc field names so log output stays queryable.
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Storage failure, fatal saga step |
//! | WARN  | Best-effort step failed, limit anomalies |
//! | INFO  | Case created, server lifecycle |
//! | DEBUG | Step-by-step orchestration flow |

/// Standard log field names
pub mod fields {
    /// Casefile identifier
    pub const CASE_ID: &str = "case_id";
    /// API key identifier
    pub const API_KEY_ID: &str = "api_key_id";
    /// Operation name (see [`super::operations`])
    pub const OPERATION: &str = "operation";
    /// Duration in milliseconds
    pub const DURATION_MS: &str = "duration_ms";
    /// Error message
    pub const ERROR: &str = "error";
    /// Item count
    pub const COUNT: &str = "count";
    /// Client count on a case
    pub const CLIENT_COUNT: &str = "client_count";
    /// Defendant count on a case
    pub const DEFENDANT_COUNT: &str = "defendant_count";
    /// HTTP status code
    pub const STATUS: &str = "status";
}

/// Log operation categories for consistent naming
pub mod operations {
    pub const INTAKE_SUBMIT: &str = "intake_submit";
    pub const KEY_VALIDATE: &str = "key_validate";
    pub const RATE_CHECK: &str = "rate_check";
    pub const REFERENCE_RESOLVE: &str = "reference_resolve";
    pub const USAGE_RECORD: &str = "usage_record";
    pub const WORK_LOG_APPEND: &str = "work_log_append";
}
