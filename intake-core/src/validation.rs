//! Intake payload validation
//!
//! Validates and normalizes the nested wizard payload: one case, N clients,
//! M defendants. Every violation found is collected (field path + message),
//! not just the first; on success the normalized payload has all defaults
//! applied and all entity references resolved into the tagged union.

use chrono::NaiveDate;

use crate::error::{FieldViolation, IntakeError, IntakeResult};
use crate::types::intake::{ClientIntake, DefendantIntake, IntakeData};
use crate::types::normalized::{NormalizedClient, NormalizedDefendant, NormalizedIntake};
use crate::types::reference::{RawReference, Reference};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate a raw intake payload against today's date.
///
/// Returns the normalized payload, or `IntakeError::Validation` carrying one
/// entry per violation.
pub fn validate_intake(data: &IntakeData, today: NaiveDate) -> IntakeResult<NormalizedIntake> {
    let mut violations = Vec::new();

    let date_of_loss = check_date_of_loss(&data.date_of_loss, today, &mut violations);

    if data.clients.is_empty() {
        violations.push(FieldViolation::new(
            "clients",
            "at least one client is required",
        ));
    }

    let clients: Vec<_> = data
        .clients
        .iter()
        .enumerate()
        .filter_map(|(i, c)| check_client(c, i, &mut violations))
        .collect();

    let defendant_count = data.defendants.len();
    let defendants: Vec<_> = data
        .defendants
        .iter()
        .enumerate()
        .filter_map(|(i, d)| check_defendant(d, i, defendant_count, &mut violations))
        .collect();

    if !violations.is_empty() {
        return Err(IntakeError::Validation(violations));
    }

    // Unreachable fallback: date_of_loss is always Some when no violations
    // were recorded.
    let date_of_loss = date_of_loss.unwrap_or(today);

    Ok(NormalizedIntake {
        date_of_loss,
        accident_description: data.accident_description.trim().to_string(),
        accident_city: data.accident_city.trim().to_string(),
        accident_state: data.accident_state.trim().to_string(),
        clients,
        defendants,
    })
}

fn check_date_of_loss(
    raw: &str,
    today: NaiveDate,
    violations: &mut Vec<FieldViolation>,
) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(date) if date > today => {
            violations.push(FieldViolation::new(
                "dateOfLoss",
                "date of loss must not be in the future",
            ));
            None
        }
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(FieldViolation::new(
                "dateOfLoss",
                "date of loss must be a valid YYYY-MM-DD date",
            ));
            None
        }
    }
}

fn check_client(
    client: &ClientIntake,
    index: usize,
    violations: &mut Vec<FieldViolation>,
) -> Option<NormalizedClient> {
    let path = |field: &str| format!("clients[{index}].{field}");
    let before = violations.len();

    for (field, value) in [
        ("firstName", &client.first_name),
        ("lastName", &client.last_name),
        ("streetAddress", &client.street_address),
        ("city", &client.city),
        ("state", &client.state),
        ("zipCode", &client.zip_code),
        ("primaryPhone", &client.primary_phone),
    ] {
        if value.trim().is_empty() {
            violations.push(FieldViolation::new(path(field), "field is required"));
        }
    }

    let date_of_birth = match NaiveDate::parse_from_str(client.date_of_birth.trim(), DATE_FORMAT) {
        Ok(d) => Some(d),
        Err(_) => {
            violations.push(FieldViolation::new(
                path("dateOfBirth"),
                "date of birth must be a valid YYYY-MM-DD date",
            ));
            None
        }
    };

    if !client.email.trim().is_empty() && !is_well_formed_email(client.email.trim()) {
        violations.push(FieldViolation::new(
            path("email"),
            "email address is malformed",
        ));
    }

    let health_insurance = if client.has_health_insurance {
        check_reference(
            client.health_insurance_company.as_ref(),
            &client.health_insurance_company_name,
            &path("healthInsuranceCompany"),
            violations,
        )
    } else {
        None
    };

    let auto_insurance = if client.has_auto_insurance {
        check_reference(
            client.auto_insurance_company.as_ref(),
            &client.auto_insurance_company_name,
            &path("autoInsuranceCompany"),
            violations,
        )
    } else {
        None
    };

    let mut medical_providers = Vec::with_capacity(client.medical_providers.len());
    for (j, selection) in client.medical_providers.iter().enumerate() {
        match Reference::from_raw(&selection.provider, Some(&selection.provider_name)) {
            Ok(reference) => medical_providers.push(reference),
            Err(message) => violations.push(FieldViolation::new(
                format!("clients[{index}].medicalProviders[{j}]"),
                message,
            )),
        }
    }

    if violations.len() > before {
        return None;
    }

    Some(NormalizedClient {
        first_name: client.first_name.trim().to_string(),
        last_name: client.last_name.trim().to_string(),
        date_of_birth: date_of_birth?,
        street_address: client.street_address.trim().to_string(),
        city: client.city.trim().to_string(),
        state: client.state.trim().to_string(),
        zip_code: client.zip_code.trim().to_string(),
        primary_phone: client.primary_phone.trim().to_string(),
        secondary_phone: client.secondary_phone.trim().to_string(),
        email: client.email.trim().to_string(),
        ssn_last_four: client.ssn_last_four.trim().to_string(),
        marital_status: client.marital_status.trim().to_string(),
        employer_name: client.employer_name.trim().to_string(),
        is_driver: client.is_driver,
        medical_history: client.medical_history.trim().to_string(),
        injuries_description: client.injuries_description.trim().to_string(),
        health_insurance,
        health_member_id: client.health_member_id.trim().to_string(),
        auto_insurance,
        auto_policy_number: client.auto_policy_number.trim().to_string(),
        pip_available: client.pip_available,
        pip_used: client.pip_used,
        medpay_available: client.medpay_available,
        medpay_used: client.medpay_used,
        medical_providers,
    })
}

fn check_defendant(
    defendant: &DefendantIntake,
    index: usize,
    total: usize,
    violations: &mut Vec<FieldViolation>,
) -> Option<NormalizedDefendant> {
    let path = |field: &str| format!("defendants[{index}].{field}");
    let before = violations.len();

    if defendant.first_name.trim().is_empty() && defendant.business_name.trim().is_empty() {
        violations.push(FieldViolation::new(path("firstName"), "field is required"));
    }
    if defendant.last_name.trim().is_empty() && defendant.business_name.trim().is_empty() {
        violations.push(FieldViolation::new(path("lastName"), "field is required"));
    }

    let liability_percentage = match defendant.liability_percentage {
        Some(v) if (0..=100).contains(&v) => v,
        Some(v) => {
            violations.push(FieldViolation::new(
                path("liabilityPercentage"),
                format!("liability percentage must be between 0 and 100, got {v}"),
            ));
            0
        }
        // The wizard may omit liability for single-defendant cases.
        None => 100,
    };

    if !defendant.adjuster_email.trim().is_empty()
        && !is_well_formed_email(defendant.adjuster_email.trim())
    {
        violations.push(FieldViolation::new(
            path("adjusterEmail"),
            "email address is malformed",
        ));
    }

    let insurer = match defendant.insurance_company.as_ref() {
        Some(raw) => check_reference(
            Some(raw),
            &defendant.insurance_company_name,
            &path("insuranceCompany"),
            violations,
        ),
        // A bare company name still means "this defendant is insured".
        None if !defendant.insurance_company_name.trim().is_empty() => Some(Reference::Pending(
            Some(defendant.insurance_company_name.trim().to_string()),
        )),
        None => None,
    };

    if let Some(related) = defendant.related_to_defendant_index {
        if related == 0 || related > total {
            violations.push(FieldViolation::new(
                path("relatedToDefendantIndex"),
                format!("must reference a defendant between 1 and {total}"),
            ));
        } else if related == index + 1 {
            violations.push(FieldViolation::new(
                path("relatedToDefendantIndex"),
                "defendant cannot be related to itself",
            ));
        }
    }

    if violations.len() > before {
        return None;
    }

    Some(NormalizedDefendant {
        first_name: defendant.first_name.trim().to_string(),
        last_name: defendant.last_name.trim().to_string(),
        business_name: defendant.business_name.trim().to_string(),
        street_address: defendant.street_address.trim().to_string(),
        city: defendant.city.trim().to_string(),
        state: defendant.state.trim().to_string(),
        zip_code: defendant.zip_code.trim().to_string(),
        liability_percentage,
        insurer,
        policy_number: defendant.policy_number.trim().to_string(),
        claim_number: defendant.claim_number.trim().to_string(),
        adjuster_name: defendant.adjuster_name.trim().to_string(),
        adjuster_email: defendant.adjuster_email.trim().to_string(),
        adjuster_phone: defendant.adjuster_phone.trim().to_string(),
        related_to_defendant_index: defendant.related_to_defendant_index,
        relationship_type: defendant.relationship_type.trim().to_string(),
    })
}

/// Interpret an optional insurer reference for a party that indicated
/// coverage. A missing reference with a display name present is treated as a
/// pending creation; missing both is a violation.
fn check_reference(
    raw: Option<&RawReference>,
    display_name: &str,
    field: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<Reference> {
    match raw {
        Some(raw) => match Reference::from_raw(raw, Some(display_name)) {
            Ok(reference) => Some(reference),
            Err(message) => {
                violations.push(FieldViolation::new(field, message));
                None
            }
        },
        None if !display_name.trim().is_empty() => {
            Some(Reference::Pending(Some(display_name.trim().to_string())))
        }
        None => {
            violations.push(FieldViolation::new(field, "insurer reference is required"));
            None
        }
    }
}

fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}
