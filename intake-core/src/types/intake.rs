//! Wire-form intake payload
//!
//! The shape the intake wizard submits: one case, N clients, M defendants.
//! Optional fields default to empty string / zero / false so downstream code
//! never deals with missing values. Field names are camelCase on the wire.

use serde::Deserialize;

use crate::types::reference::RawReference;

/// Full intake payload as submitted by the wizard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeData {
    /// Date of loss, `YYYY-MM-DD`
    #[serde(default)]
    pub date_of_loss: String,
    #[serde(default)]
    pub accident_description: String,
    #[serde(default)]
    pub accident_city: String,
    #[serde(default)]
    pub accident_state: String,
    #[serde(default)]
    pub clients: Vec<ClientIntake>,
    #[serde(default)]
    pub defendants: Vec<DefendantIntake>,
}

/// One client on the intake form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIntake {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub primary_phone: String,
    #[serde(default)]
    pub secondary_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub ssn_last_four: String,
    #[serde(default)]
    pub marital_status: String,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub is_driver: bool,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub injuries_description: String,

    #[serde(default)]
    pub has_health_insurance: bool,
    #[serde(default)]
    pub health_insurance_company: Option<RawReference>,
    #[serde(default)]
    pub health_insurance_company_name: String,
    #[serde(default)]
    pub health_member_id: String,

    #[serde(default)]
    pub has_auto_insurance: bool,
    #[serde(default)]
    pub auto_insurance_company: Option<RawReference>,
    #[serde(default)]
    pub auto_insurance_company_name: String,
    #[serde(default)]
    pub auto_policy_number: String,
    #[serde(default)]
    pub pip_available: f64,
    #[serde(default)]
    pub pip_used: f64,
    #[serde(default)]
    pub medpay_available: f64,
    #[serde(default)]
    pub medpay_used: f64,

    /// Medical providers treating this client; one bill stub per entry.
    #[serde(default)]
    pub medical_providers: Vec<ProviderSelection>,
}

/// A medical-provider selection on the intake form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSelection {
    pub provider: RawReference,
    #[serde(default)]
    pub provider_name: String,
}

/// One defendant on the intake form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefendantIntake {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    /// Integer percentage in [0, 100]; defaults to 100 when omitted.
    #[serde(default)]
    pub liability_percentage: Option<i64>,

    #[serde(default)]
    pub insurance_company: Option<RawReference>,
    #[serde(default)]
    pub insurance_company_name: String,
    #[serde(default)]
    pub policy_number: String,
    #[serde(default)]
    pub claim_number: String,
    #[serde(default)]
    pub adjuster_name: String,
    #[serde(default)]
    pub adjuster_email: String,
    #[serde(default)]
    pub adjuster_phone: String,

    /// 1-based index of another defendant in this same submission this one
    /// is related to (e.g. spouse of defendant #1).
    #[serde(default)]
    pub related_to_defendant_index: Option<usize>,
    #[serde(default)]
    pub relationship_type: String,
}
