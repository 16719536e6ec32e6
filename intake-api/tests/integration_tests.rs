//! Integration tests for the intake API
//!
//! These tests drive the full pipeline over HTTP: authentication, rate
//! limiting, payload validation, case-graph creation and audit logging.

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Months, NaiveDate, Utc};
use intake_api::{create_router, AppState};
use intake_db::{
    hash_secret, ApiKeyRepo, CasefileRepo, ClaimRepo, ClientRepo, RateLimitRepo, SqliteStore,
    UsageLogRepo, WorkLogRepo,
};
use serde_json::{json, Value};

const SECRET: &str = "sk_test_0123456789abcdef0123456789abcdef";

struct TestContext {
    server: TestServer,
    store: SqliteStore,
}

/// Create a test server over a fresh in-memory database, with one API key
/// (limit 100/hour) already provisioned.
fn create_test_context() -> TestContext {
    create_test_context_with_limit(100)
}

fn create_test_context_with_limit(limit: i64) -> TestContext {
    let store = SqliteStore::open_in_memory().unwrap();
    let state = AppState::new(store.clone()).unwrap();

    ApiKeyRepo::new(store.clone())
        .insert("test", &hash_secret(SECRET), limit, None, Utc::now())
        .unwrap();

    TestContext {
        server: TestServer::new(create_router(state)).unwrap(),
        store,
    }
}

fn bearer(secret: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {secret}")).unwrap()
}

/// A minimal valid payload: one client, no defendants.
fn minimal_payload() -> Value {
    json!({
        "intakeData": {
            "dateOfLoss": "2024-03-10",
            "accidentDescription": "rear-ended at a stop light",
            "accidentCity": "Tulsa",
            "accidentState": "OK",
            "clients": [{
                "firstName": "Jane",
                "lastName": "Doe",
                "dateOfBirth": "1990-06-01",
                "streetAddress": "1 Main St",
                "city": "Tulsa",
                "state": "OK",
                "zipCode": "74103",
                "primaryPhone": "5551234567"
            }]
        }
    })
}

async fn submit(ctx: &TestContext, payload: &Value) -> axum_test::TestResponse {
    ctx.server
        .post("/api/v1/intake")
        .add_header(header::AUTHORIZATION, bearer(SECRET))
        .json(payload)
        .await
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let ctx = create_test_context();

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_check() {
    let ctx = create_test_context();

    let response = ctx.server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
}

// ============ Authentication Tests ============

#[tokio::test]
async fn test_missing_key_is_unauthorized() {
    let ctx = create_test_context();

    let response = ctx.server.post("/api/v1/intake").json(&minimal_payload()).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "AUTHENTICATION_ERROR");
}

#[tokio::test]
async fn test_unknown_key_leaves_no_side_effects() {
    let ctx = create_test_context();

    let response = ctx
        .server
        .post("/api/v1/intake")
        .add_header(
            header::AUTHORIZATION,
            bearer("sk_test_not_a_registered_key_000000"),
        )
        .json(&minimal_payload())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(CasefileRepo::new(ctx.store.clone()).count().unwrap(), 0);
    // Auth short-circuits before the limiter; no window row appears either.
    assert!(RateLimitRepo::new(ctx.store.clone())
        .list_for_key(1)
        .unwrap()
        .is_empty());
}

// ============ Validation Tests ============

#[tokio::test]
async fn test_zero_clients_is_a_validation_error() {
    let ctx = create_test_context();
    let payload = json!({
        "intakeData": {
            "dateOfLoss": "2024-03-10",
            "clients": []
        }
    });

    let response = submit(&ctx, &payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().unwrap();
    assert!(details.iter().any(|v| v["field"] == "clients"));
    assert_eq!(CasefileRepo::new(ctx.store.clone()).count().unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let ctx = create_test_context();

    let response = ctx
        .server
        .post("/api/v1/intake")
        .add_header(header::AUTHORIZATION, bearer(SECRET))
        .add_header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details[0]["field"], "body");
}

#[tokio::test]
async fn test_all_violations_are_reported_together() {
    let ctx = create_test_context();
    let payload = json!({
        "intakeData": {
            "dateOfLoss": "not-a-date",
            "clients": [{"firstName": "", "lastName": "Doe"}]
        }
    });

    let response = submit(&ctx, &payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let details = body["error"]["details"].as_array().unwrap();
    assert!(details.len() >= 2);
}

// ============ Submission Round Trip ============

#[tokio::test]
async fn test_round_trip_single_client() {
    let ctx = create_test_context();

    let response = submit(&ctx, &minimal_payload()).await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.headers().contains_key("x-ratelimit-remaining"));

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let casefile_id = body["casefileId"].as_i64().unwrap();
    assert_eq!(body["clients"].as_array().unwrap().len(), 1);
    assert_eq!(body["defendants"].as_array().unwrap().len(), 0);
    assert_eq!(body["message"], "Case created with 1 client(s) and 0 defendant(s)");

    // Statute deadline is exactly two calendar years past the date of loss.
    let casefile = CasefileRepo::new(ctx.store.clone())
        .get(casefile_id)
        .unwrap()
        .unwrap();
    let date_of_loss = NaiveDate::parse_from_str("2024-03-10", "%Y-%m-%d").unwrap();
    assert_eq!(casefile.date_of_loss, date_of_loss);
    assert_eq!(
        casefile.statute_deadline,
        date_of_loss.checked_add_months(Months::new(24)).unwrap()
    );

    let clients = ClientRepo::new(ctx.store.clone())
        .list_for_case(casefile_id)
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].first_name, "Jane");
    assert_eq!(clients[0].client_number, 1);

    let entries = WorkLogRepo::new(ctx.store.clone())
        .list_for_case(casefile_id)
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0]
        .description
        .contains("1 client(s) and 0 defendant(s)"));
}

#[tokio::test]
async fn test_full_graph_with_defendants_and_references() {
    let ctx = create_test_context();
    let payload = json!({
        "intakeData": {
            "dateOfLoss": "2024-03-10",
            "clients": [{
                "firstName": "Jane",
                "lastName": "Doe",
                "dateOfBirth": "1990-06-01",
                "streetAddress": "1 Main St",
                "city": "Tulsa",
                "state": "OK",
                "zipCode": "74103",
                "primaryPhone": "5551234567",
                "hasHealthInsurance": true,
                "healthInsuranceCompany": "temp_1",
                "healthInsuranceCompanyName": "Acme Health",
                "healthMemberId": "JD-100",
                "hasAutoInsurance": true,
                "autoInsuranceCompany": "new",
                "autoInsuranceCompanyName": "Big Mutual",
                "medicalProviders": [{"provider": "temp_2", "providerName": "Tulsa Spine"}]
            }],
            "defendants": [
                {
                    "firstName": "John",
                    "lastName": "Smith",
                    "liabilityPercentage": 60,
                    "insuranceCompany": "temp_3",
                    "insuranceCompanyName": "Other Mutual"
                },
                {
                    "firstName": "Mary",
                    "lastName": "Smith",
                    "liabilityPercentage": 40,
                    "relatedToDefendantIndex": 1,
                    "relationshipType": "spouse"
                }
            ]
        }
    });

    let response = submit(&ctx, &payload).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["clients"].as_array().unwrap().len(), 1);
    assert_eq!(body["defendants"].as_array().unwrap().len(), 2);

    let client_id = body["clients"][0].as_i64().unwrap();
    let claims = ClaimRepo::new(ctx.store.clone());
    assert_eq!(claims.bills_for_client(client_id).unwrap().len(), 1);
    assert_eq!(claims.health_claims_for_client(client_id).unwrap().len(), 1);
    assert_eq!(claims.first_party_for_client(client_id).unwrap().len(), 1);

    let first_defendant = body["defendants"][0].as_i64().unwrap();
    let second_defendant = body["defendants"][1].as_i64().unwrap();
    assert_eq!(claims.third_party_for_defendant(first_defendant).unwrap().len(), 1);
    assert!(claims.third_party_for_defendant(second_defendant).unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_submissions_create_distinct_cases() {
    let ctx = create_test_context();

    let first: Value = submit(&ctx, &minimal_payload()).await.json();
    let second: Value = submit(&ctx, &minimal_payload()).await.json();

    assert_ne!(first["casefileId"], second["casefileId"]);
    assert_eq!(CasefileRepo::new(ctx.store.clone()).count().unwrap(), 2);
}

// ============ Orchestration Failure Modes ============

#[tokio::test]
async fn test_bogus_health_insurer_fails_the_submission() {
    let ctx = create_test_context();
    let mut payload = minimal_payload();
    payload["intakeData"]["clients"][0]["hasHealthInsurance"] = json!(true);
    payload["intakeData"]["clients"][0]["healthInsuranceCompany"] = json!(9999);

    let response = submit(&ctx, &payload).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    // The casefile written before the failing step is not rolled back.
    assert_eq!(CasefileRepo::new(ctx.store.clone()).count().unwrap(), 1);
}

#[tokio::test]
async fn test_bogus_auto_insurer_is_tolerated() {
    let ctx = create_test_context();
    let mut payload = minimal_payload();
    payload["intakeData"]["clients"][0]["hasAutoInsurance"] = json!(true);
    payload["intakeData"]["clients"][0]["autoInsuranceCompany"] = json!(9999);

    let response = submit(&ctx, &payload).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let client_id = body["clients"][0].as_i64().unwrap();
    assert!(ClaimRepo::new(ctx.store.clone())
        .first_party_for_client(client_id)
        .unwrap()
        .is_empty());
}

// ============ Rate Limiting Tests ============

#[tokio::test]
async fn test_rate_limit_boundary() {
    let ctx = create_test_context_with_limit(2);

    submit(&ctx, &minimal_payload()).await.assert_status(StatusCode::CREATED);
    submit(&ctx, &minimal_payload()).await.assert_status(StatusCode::CREATED);

    let response = submit(&ctx, &minimal_payload()).await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("x-ratelimit-reset"));
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");

    // The rejected request created nothing.
    assert_eq!(CasefileRepo::new(ctx.store.clone()).count().unwrap(), 2);
}

#[tokio::test]
async fn test_remaining_header_counts_down() {
    let ctx = create_test_context_with_limit(3);

    let first = submit(&ctx, &minimal_payload()).await;
    assert_eq!(first.headers()["x-ratelimit-remaining"], "2");
    let second = submit(&ctx, &minimal_payload()).await;
    assert_eq!(second.headers()["x-ratelimit-remaining"], "1");
}

// ============ Audit Logging Tests ============

#[tokio::test]
async fn test_every_invocation_is_audited() {
    let ctx = create_test_context();

    submit(&ctx, &minimal_payload()).await.assert_status(StatusCode::CREATED);
    ctx.server
        .post("/api/v1/intake")
        .json(&minimal_payload())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Recording is spawned; give it a beat to land.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let rows = UsageLogRepo::new(ctx.store.clone()).recent(10).unwrap();
    assert_eq!(rows.len(), 2);

    // Spawned writes may land in either order.
    let created = rows.iter().find(|r| r.status_code == 201).unwrap();
    let rejected = rows.iter().find(|r| r.status_code == 401).unwrap();
    assert!(created.api_key_id.is_some());
    assert_eq!(created.endpoint, "/api/v1/intake");
    assert!(created.response_body.contains("casefileId"));
    assert!(rejected.api_key_id.is_none());
    assert!(rejected.response_body.contains("AUTHENTICATION_ERROR"));
}
