//! Normalized intake payload
//!
//! Output of the schema validator: dates are parsed, entity references are
//! resolved into the tagged [`Reference`] union, defaults are applied, and
//! every structural rule has already been checked. The orchestrator only
//! ever consumes this form.

use chrono::NaiveDate;

use crate::types::reference::Reference;

/// A fully validated intake submission.
#[derive(Debug, Clone)]
pub struct NormalizedIntake {
    pub date_of_loss: NaiveDate,
    pub accident_description: String,
    pub accident_city: String,
    pub accident_state: String,
    /// Never empty
    pub clients: Vec<NormalizedClient>,
    pub defendants: Vec<NormalizedDefendant>,
}

#[derive(Debug, Clone)]
pub struct NormalizedClient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub primary_phone: String,
    pub secondary_phone: String,
    pub email: String,
    pub ssn_last_four: String,
    pub marital_status: String,
    pub employer_name: String,
    pub is_driver: bool,
    pub medical_history: String,
    pub injuries_description: String,

    /// Present iff the client indicated health coverage.
    pub health_insurance: Option<Reference>,
    pub health_member_id: String,

    /// Present iff the client indicated auto coverage.
    pub auto_insurance: Option<Reference>,
    pub auto_policy_number: String,
    pub pip_available: f64,
    pub pip_used: f64,
    pub medpay_available: f64,
    pub medpay_used: f64,

    pub medical_providers: Vec<Reference>,
}

#[derive(Debug, Clone)]
pub struct NormalizedDefendant {
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Defaulted to 100 when the wizard omitted it.
    pub liability_percentage: i64,

    pub insurer: Option<Reference>,
    pub policy_number: String,
    pub claim_number: String,
    pub adjuster_name: String,
    pub adjuster_email: String,
    pub adjuster_phone: String,

    /// 1-based index into this submission's defendants, resolved to a real
    /// row id by the orchestrator's post-insert second pass.
    pub related_to_defendant_index: Option<usize>,
    pub relationship_type: String,
}
