//! Case-graph orchestration
//!
//! The multi-step saga that turns a validated intake submission into a
//! consistent graph of rows: casefile, clients, per-client medical bills /
//! health claims / first-party claims, defendants and their third-party
//! claims, and a summarizing work-log entry.
//!
//! Steps run strictly in order, each awaiting its storage round trip.
//! There are no compensating deletes: once a step has committed, a failure
//! in a later step leaves the earlier rows in place (only per-statement
//! atomicity is assumed of the store). First-party-claim creation is the
//! one best-effort step: its failure is logged and the submission still
//! succeeds; every other step aborts the saga.

use chrono::{DateTime, Utc};
use intake_core::types::case::{days_until, initial_case_state, statute_deadline};
use intake_core::{IntakeError, IntakeResult, NormalizedClient, NormalizedDefendant, NormalizedIntake};
use tracing::{debug, info, warn};

use crate::repos::{
    CasefileRepo, ClaimRepo, ClientRepo, DefendantRepo, NewCasefile, WorkLogRepo,
};
use crate::services::reference_service::{ReferenceService, ReferenceTarget};
use crate::store::SqliteStore;

/// Author recorded on the synthetic work-log entry.
const SYSTEM_AUTHOR: &str = "system";

/// Identifiers of everything the saga created.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub casefile_id: i64,
    /// In submission order (client_number 1..N)
    pub client_ids: Vec<i64>,
    /// In submission order (defendant_number 1..M)
    pub defendant_ids: Vec<i64>,
}

pub struct IntakeService {
    casefiles: CasefileRepo,
    clients: ClientRepo,
    defendants: DefendantRepo,
    claims: ClaimRepo,
    work_log: WorkLogRepo,
    references: ReferenceService,
}

impl IntakeService {
    pub fn new(store: SqliteStore) -> Self {
        Self {
            casefiles: CasefileRepo::new(store.clone()),
            clients: ClientRepo::new(store.clone()),
            defendants: DefendantRepo::new(store.clone()),
            claims: ClaimRepo::new(store.clone()),
            work_log: WorkLogRepo::new(store.clone()),
            references: ReferenceService::new(store),
        }
    }

    /// Execute the intake saga for a validated submission.
    pub async fn submit(
        &self,
        intake: &NormalizedIntake,
        now: DateTime<Utc>,
    ) -> IntakeResult<IntakeOutcome> {
        // Step 1: the casefile with computed statute fields.
        let deadline = statute_deadline(intake.date_of_loss);
        let (stage, status) = initial_case_state();
        let casefile_id = self
            .casefiles
            .insert(
                &NewCasefile {
                    stage: stage.as_str().to_string(),
                    status: status.as_str().to_string(),
                    date_of_loss: intake.date_of_loss,
                    accident_description: intake.accident_description.clone(),
                    accident_city: intake.accident_city.clone(),
                    accident_state: intake.accident_state.clone(),
                    statute_deadline: deadline,
                    days_until_statute: days_until(deadline, now.date_naive()),
                    client_count: intake.clients.len() as i64,
                    defendant_count: intake.defendants.len() as i64,
                },
                now,
            )
            .map_err(|e| IntakeError::Database(format!("case creation failed: {e}")))?;
        debug!(case_id = casefile_id, operation = "intake_submit", "casefile created");

        // Step 2: all clients in one batch, order preserved.
        let client_ids = self
            .clients
            .insert_batch(casefile_id, &intake.clients, now)
            .map_err(|e| IntakeError::Database(format!("client creation failed: {e}")))?;

        // Step 3: per-client dependents, in client order.
        for (client, &client_id) in intake.clients.iter().zip(&client_ids) {
            self.create_client_dependents(client, client_id, now).await?;
        }

        // Step 4: defendants and their third-party claims.
        let defendant_ids = if intake.defendants.is_empty() {
            Vec::new()
        } else {
            self.create_defendants(casefile_id, &intake.defendants, now)
                .await?
        };

        // Step 5: one summarizing work-log entry, best-effort.
        let description = format!(
            "New case intake completed via API with {} client(s) and {} defendant(s)",
            client_ids.len(),
            defendant_ids.len()
        );
        if let Err(error) = self
            .work_log
            .append(Some(casefile_id), &description, SYSTEM_AUTHOR, now)
        {
            warn!(case_id = casefile_id, error = %error, "failed to append intake work-log entry");
        }

        info!(
            case_id = casefile_id,
            client_count = client_ids.len(),
            defendant_count = defendant_ids.len(),
            operation = "intake_submit",
            "case graph created"
        );

        Ok(IntakeOutcome {
            casefile_id,
            client_ids,
            defendant_ids,
        })
    }

    /// Step 3 body: medical bills and health claims are fatal; the
    /// first-party claim is best-effort.
    async fn create_client_dependents(
        &self,
        client: &NormalizedClient,
        client_id: i64,
        now: DateTime<Utc>,
    ) -> IntakeResult<()> {
        for provider_ref in &client.medical_providers {
            let provider_id = self
                .references
                .resolve(provider_ref, ReferenceTarget::MedicalProvider, now)
                .await
                .map_err(|e| IntakeError::Database(format!("medical bill creation failed: {e}")))?;
            self.claims
                .insert_medical_bill(client_id, provider_id, now)
                .map_err(|e| IntakeError::Database(format!("medical bill creation failed: {e}")))?;
        }

        if let Some(health_ref) = &client.health_insurance {
            let company_id = self
                .references
                .resolve(health_ref, ReferenceTarget::HealthInsurance, now)
                .await
                .map_err(|e| IntakeError::Database(format!("health claim creation failed: {e}")))?;
            self.claims
                .insert_health(client_id, company_id, &client.health_member_id, now)
                .map_err(|e| IntakeError::Database(format!("health claim creation failed: {e}")))?;
        }

        if client.auto_insurance.is_some() {
            if let Err(error) = self.create_first_party_claim(client, client_id, now).await {
                // Intentional asymmetry: first-party claims are best-effort.
                warn!(
                    client_id,
                    error = %error,
                    "first-party claim creation failed, continuing intake"
                );
            }
        }

        Ok(())
    }

    async fn create_first_party_claim(
        &self,
        client: &NormalizedClient,
        client_id: i64,
        now: DateTime<Utc>,
    ) -> IntakeResult<i64> {
        let Some(auto_ref) = &client.auto_insurance else {
            return Err(IntakeError::Internal("no auto insurer reference".to_string()));
        };
        let company_id = self
            .references
            .resolve(auto_ref, ReferenceTarget::AutoInsurance, now)
            .await?;
        self.claims
            .insert_first_party(
                client_id,
                company_id,
                &client.auto_policy_number,
                client.pip_available,
                client.pip_used,
                client.medpay_available,
                client.medpay_used,
                now,
            )
            .map_err(|e| IntakeError::Database(e.to_string()))
    }

    /// Step 4 body: batch insert (insurers resolved first), then the
    /// related-defendant second pass, then third-party claims. All fatal.
    async fn create_defendants(
        &self,
        casefile_id: i64,
        defendants: &[NormalizedDefendant],
        now: DateTime<Utc>,
    ) -> IntakeResult<Vec<i64>> {
        let liability_sum: i64 = defendants.iter().map(|d| d.liability_percentage).sum();
        if liability_sum != 100 {
            // The wizard owns this invariant; observed drift is only logged.
            warn!(
                case_id = casefile_id,
                liability_sum,
                count = defendants.len(),
                "defendant liability percentages do not sum to 100"
            );
        }

        let mut insurer_ids = Vec::with_capacity(defendants.len());
        for defendant in defendants {
            let insurer_id = match &defendant.insurer {
                Some(reference) => Some(
                    self.references
                        .resolve(reference, ReferenceTarget::AutoInsurance, now)
                        .await
                        .map_err(|e| {
                            IntakeError::Database(format!("defendant creation failed: {e}"))
                        })?,
                ),
                None => None,
            };
            insurer_ids.push(insurer_id);
        }

        let defendant_ids = self
            .defendants
            .insert_batch(casefile_id, defendants, &insurer_ids, now)
            .map_err(|e| IntakeError::Database(format!("defendant creation failed: {e}")))?;

        // Second pass: index-based relationship placeholders become real ids.
        for (defendant, &defendant_id) in defendants.iter().zip(&defendant_ids) {
            if let Some(index) = defendant.related_to_defendant_index {
                let related_id = defendant_ids
                    .get(index - 1)
                    .copied()
                    .ok_or_else(|| {
                        IntakeError::Internal(format!(
                            "related defendant index {index} out of range"
                        ))
                    })?;
                self.defendants
                    .set_related(defendant_id, related_id)
                    .map_err(|e| IntakeError::Database(format!("defendant creation failed: {e}")))?;
            }
        }

        for (defendant, &defendant_id) in defendants.iter().zip(&defendant_ids) {
            if let Some(reference) = &defendant.insurer {
                let company_id = self
                    .references
                    .resolve(reference, ReferenceTarget::AutoInsurance, now)
                    .await
                    .map_err(|e| {
                        IntakeError::Database(format!("third-party claim creation failed: {e}"))
                    })?;
                self.claims
                    .insert_third_party(defendant_id, company_id, &defendant.claim_number, now)
                    .map_err(|e| {
                        IntakeError::Database(format!("third-party claim creation failed: {e}"))
                    })?;
            }
        }

        Ok(defendant_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use intake_core::Reference;

    struct Fixture {
        store: SqliteStore,
        service: IntakeService,
    }

    fn setup() -> Fixture {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        Fixture {
            service: IntakeService::new(store.clone()),
            store,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn client(first_name: &str) -> NormalizedClient {
        NormalizedClient {
            first_name: first_name.into(),
            last_name: "Doe".into(),
            date_of_birth: date("1990-01-01"),
            street_address: "1 Main St".into(),
            city: "Tulsa".into(),
            state: "OK".into(),
            zip_code: "74103".into(),
            primary_phone: "5551234567".into(),
            secondary_phone: String::new(),
            email: String::new(),
            ssn_last_four: String::new(),
            marital_status: String::new(),
            employer_name: String::new(),
            is_driver: false,
            medical_history: String::new(),
            injuries_description: String::new(),
            health_insurance: None,
            health_member_id: String::new(),
            auto_insurance: None,
            auto_policy_number: String::new(),
            pip_available: 0.0,
            pip_used: 0.0,
            medpay_available: 0.0,
            medpay_used: 0.0,
            medical_providers: Vec::new(),
        }
    }

    fn defendant(first_name: &str) -> NormalizedDefendant {
        NormalizedDefendant {
            first_name: first_name.into(),
            last_name: "Smith".into(),
            business_name: String::new(),
            street_address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            liability_percentage: 100,
            insurer: None,
            policy_number: String::new(),
            claim_number: String::new(),
            adjuster_name: String::new(),
            adjuster_email: String::new(),
            adjuster_phone: String::new(),
            related_to_defendant_index: None,
            relationship_type: String::new(),
        }
    }

    fn intake(clients: Vec<NormalizedClient>, defendants: Vec<NormalizedDefendant>) -> NormalizedIntake {
        NormalizedIntake {
            date_of_loss: date("2024-01-15"),
            accident_description: "rear-ended".into(),
            accident_city: "Tulsa".into(),
            accident_state: "OK".into(),
            clients,
            defendants,
        }
    }

    #[tokio::test]
    async fn test_statute_fields_and_initial_state() {
        let f = setup();
        let outcome = f
            .service
            .submit(&intake(vec![client("Jane")], vec![]), now())
            .await
            .unwrap();

        let casefile = CasefileRepo::new(f.store.clone())
            .get(outcome.casefile_id)
            .unwrap()
            .unwrap();
        assert_eq!(casefile.stage, "intake");
        assert_eq!(casefile.status, "new");
        assert_eq!(casefile.statute_deadline, date("2026-01-15"));
        // 2026-06-01 is past the 2026-01-15 deadline
        assert_eq!(casefile.days_until_statute, -137);
        assert_eq!(casefile.client_count, 1);
        assert_eq!(casefile.defendant_count, 0);
    }

    #[tokio::test]
    async fn test_clients_are_numbered_in_submission_order() {
        let f = setup();
        let outcome = f
            .service
            .submit(
                &intake(vec![client("Jane"), client("Mary"), client("Ann")], vec![]),
                now(),
            )
            .await
            .unwrap();
        assert_eq!(outcome.client_ids.len(), 3);

        let rows = ClientRepo::new(f.store.clone())
            .list_for_case(outcome.casefile_id)
            .unwrap();
        let numbers: Vec<_> = rows.iter().map(|c| c.client_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        let names: Vec<_> = rows.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, vec!["Jane", "Mary", "Ann"]);
    }

    #[tokio::test]
    async fn test_work_log_summarizes_counts() {
        let f = setup();
        let outcome = f
            .service
            .submit(&intake(vec![client("Jane")], vec![]), now())
            .await
            .unwrap();

        let entries = WorkLogRepo::new(f.store.clone())
            .list_for_case(outcome.casefile_id)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].description.contains("1 client(s) and 0 defendant(s)"));
        assert_eq!(entries[0].author, "system");
    }

    #[tokio::test]
    async fn test_pending_references_materialize_dependents() {
        let f = setup();
        let mut c = client("Jane");
        c.medical_providers = vec![Reference::Pending(Some("Tulsa Spine Clinic".into()))];
        c.health_insurance = Some(Reference::Pending(Some("Acme Health".into())));
        c.auto_insurance = Some(Reference::Pending(None));

        let outcome = f.service.submit(&intake(vec![c], vec![]), now()).await.unwrap();
        let client_id = outcome.client_ids[0];

        let claims = ClaimRepo::new(f.store.clone());
        let bills = claims.bills_for_client(client_id).unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].billed_amount, 0.0);
        assert!(!bills[0].is_resolved);

        assert_eq!(claims.health_claims_for_client(client_id).unwrap().len(), 1);
        assert_eq!(claims.first_party_for_client(client_id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_first_party_failure_is_non_fatal() {
        let f = setup();
        let mut c = client("Jane");
        // Nonexistent insurer id; the FK rejects the claim insert.
        c.auto_insurance = Some(Reference::Existing(9999));

        let outcome = f.service.submit(&intake(vec![c], vec![]), now()).await.unwrap();

        let claims = ClaimRepo::new(f.store.clone());
        assert!(claims
            .first_party_for_client(outcome.client_ids[0])
            .unwrap()
            .is_empty());
        // The case itself was still created.
        assert!(CasefileRepo::new(f.store.clone())
            .get(outcome.casefile_id)
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_medical_bill_failure_aborts_the_saga() {
        let f = setup();
        let mut c = client("Jane");
        c.medical_providers = vec![Reference::Existing(9999)];

        let err = f.service.submit(&intake(vec![c], vec![]), now()).await.unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert!(err.to_string().contains("medical bill creation failed"));

        // No compensation: the casefile row written in step 1 remains.
        assert_eq!(CasefileRepo::new(f.store.clone()).count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_health_claim_failure_aborts_the_saga() {
        let f = setup();
        let mut c = client("Jane");
        c.health_insurance = Some(Reference::Existing(9999));

        let err = f.service.submit(&intake(vec![c], vec![]), now()).await.unwrap_err();
        assert!(err.to_string().contains("health claim creation failed"));
    }

    #[tokio::test]
    async fn test_defendants_with_insurers_get_third_party_claims() {
        let f = setup();
        let mut d1 = defendant("John");
        d1.liability_percentage = 60;
        d1.insurer = Some(Reference::Pending(Some("Big Auto Co".into())));
        let mut d2 = defendant("Mary");
        d2.liability_percentage = 40;

        let outcome = f
            .service
            .submit(&intake(vec![client("Jane")], vec![d1, d2]), now())
            .await
            .unwrap();
        assert_eq!(outcome.defendant_ids.len(), 2);

        let rows = DefendantRepo::new(f.store.clone())
            .list_for_case(outcome.casefile_id)
            .unwrap();
        assert_eq!(rows[0].defendant_number, 1);
        assert_eq!(rows[1].defendant_number, 2);
        assert!(rows[0].insurance_company_id.is_some());
        assert!(rows[1].insurance_company_id.is_none());

        let claims = ClaimRepo::new(f.store.clone());
        assert_eq!(claims.third_party_for_defendant(rows[0].id).unwrap().len(), 1);
        assert!(claims.third_party_for_defendant(rows[1].id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_related_defendant_second_pass() {
        let f = setup();
        let d1 = defendant("John");
        let mut d2 = defendant("Mary");
        d2.related_to_defendant_index = Some(1);
        d2.relationship_type = "spouse".into();

        let outcome = f
            .service
            .submit(&intake(vec![client("Jane")], vec![d1, d2]), now())
            .await
            .unwrap();

        let rows = DefendantRepo::new(f.store.clone())
            .list_for_case(outcome.casefile_id)
            .unwrap();
        assert_eq!(rows[0].related_defendant_id, None);
        assert_eq!(rows[1].related_defendant_id, Some(rows[0].id));
        assert_eq!(rows[1].relationship_type, "spouse");
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_distinct_cases() {
        let f = setup();
        let payload = intake(vec![client("Jane")], vec![]);
        let first = f.service.submit(&payload, now()).await.unwrap();
        let second = f.service.submit(&payload, now()).await.unwrap();
        assert_ne!(first.casefile_id, second.casefile_id);
        assert_eq!(CasefileRepo::new(f.store.clone()).count().unwrap(), 2);
    }
}
