//! SQLite schema definitions for the intake pipeline

/// Complete intake schema
pub const INTAKE_SCHEMA: &str = r#"
-- ============================================
-- API Keys (machine credentials)
-- ============================================
CREATE TABLE IF NOT EXISTS api_keys (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT NOT NULL DEFAULT '',
    key_hash            TEXT NOT NULL UNIQUE,
    is_active           INTEGER NOT NULL DEFAULT 1,
    expires_at          TEXT,
    rate_limit_per_hour INTEGER NOT NULL DEFAULT 100,
    last_used_at        TEXT,
    created_at          TEXT NOT NULL
);

-- ============================================
-- Rate-limit windows (one row per key per hour)
-- ============================================
CREATE TABLE IF NOT EXISTS rate_limit_windows (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    api_key_id    INTEGER NOT NULL REFERENCES api_keys(id),
    window_start  TEXT NOT NULL,
    window_end    TEXT NOT NULL,
    request_count INTEGER NOT NULL DEFAULT 0,
    UNIQUE (api_key_id, window_start)
);
CREATE INDEX IF NOT EXISTS idx_rate_limit_key ON rate_limit_windows (api_key_id, window_start);

-- ============================================
-- Casefiles (root of the intake graph)
-- ============================================
CREATE TABLE IF NOT EXISTS casefiles (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    stage                TEXT NOT NULL,
    status               TEXT NOT NULL,
    date_of_loss         TEXT NOT NULL,
    accident_description TEXT NOT NULL DEFAULT '',
    accident_city        TEXT NOT NULL DEFAULT '',
    accident_state       TEXT NOT NULL DEFAULT '',
    statute_deadline     TEXT NOT NULL,
    days_until_statute   INTEGER NOT NULL,
    client_count         INTEGER NOT NULL DEFAULT 0,
    defendant_count      INTEGER NOT NULL DEFAULT 0,
    is_archived          INTEGER NOT NULL DEFAULT 0,
    created_at           TEXT NOT NULL
);

-- ============================================
-- Clients (owned by exactly one casefile)
-- ============================================
CREATE TABLE IF NOT EXISTS clients (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    casefile_id          INTEGER NOT NULL REFERENCES casefiles(id),
    client_number        INTEGER NOT NULL,
    first_name           TEXT NOT NULL,
    last_name            TEXT NOT NULL,
    date_of_birth        TEXT NOT NULL,
    street_address       TEXT NOT NULL DEFAULT '',
    city                 TEXT NOT NULL DEFAULT '',
    state                TEXT NOT NULL DEFAULT '',
    zip_code             TEXT NOT NULL DEFAULT '',
    primary_phone        TEXT NOT NULL DEFAULT '',
    secondary_phone      TEXT NOT NULL DEFAULT '',
    email                TEXT NOT NULL DEFAULT '',
    ssn_last_four        TEXT NOT NULL DEFAULT '',
    marital_status       TEXT NOT NULL DEFAULT '',
    employer_name        TEXT NOT NULL DEFAULT '',
    is_driver            INTEGER NOT NULL DEFAULT 0,
    medical_history      TEXT NOT NULL DEFAULT '',
    injuries_description TEXT NOT NULL DEFAULT '',
    created_at           TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_clients_casefile ON clients (casefile_id);

-- ============================================
-- Defendants (owned by exactly one casefile)
-- ============================================
CREATE TABLE IF NOT EXISTS defendants (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    casefile_id          INTEGER NOT NULL REFERENCES casefiles(id),
    defendant_number     INTEGER NOT NULL,
    first_name           TEXT NOT NULL DEFAULT '',
    last_name            TEXT NOT NULL DEFAULT '',
    business_name        TEXT NOT NULL DEFAULT '',
    street_address       TEXT NOT NULL DEFAULT '',
    city                 TEXT NOT NULL DEFAULT '',
    state                TEXT NOT NULL DEFAULT '',
    zip_code             TEXT NOT NULL DEFAULT '',
    liability_percentage INTEGER NOT NULL DEFAULT 100,
    insurance_company_id INTEGER REFERENCES insurance_companies(id),
    policy_number        TEXT NOT NULL DEFAULT '',
    claim_number         TEXT NOT NULL DEFAULT '',
    adjuster_name        TEXT NOT NULL DEFAULT '',
    adjuster_email       TEXT NOT NULL DEFAULT '',
    adjuster_phone       TEXT NOT NULL DEFAULT '',
    related_defendant_id INTEGER REFERENCES defendants(id),
    relationship_type    TEXT NOT NULL DEFAULT '',
    created_at           TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_defendants_casefile ON defendants (casefile_id);

-- ============================================
-- Insurance companies and medical providers
-- ============================================
CREATE TABLE IF NOT EXISTS insurance_companies (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    company_type TEXT NOT NULL CHECK (company_type IN ('auto', 'health')),
    phone        TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS medical_providers (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    phone      TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

-- ============================================
-- Claims and medical bills
-- ============================================
CREATE TABLE IF NOT EXISTS first_party_claims (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id            INTEGER NOT NULL REFERENCES clients(id),
    insurance_company_id INTEGER NOT NULL REFERENCES insurance_companies(id),
    policy_number        TEXT NOT NULL DEFAULT '',
    pip_available        REAL NOT NULL DEFAULT 0,
    pip_used             REAL NOT NULL DEFAULT 0,
    medpay_available     REAL NOT NULL DEFAULT 0,
    medpay_used          REAL NOT NULL DEFAULT 0,
    created_at           TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_first_party_client ON first_party_claims (client_id);

CREATE TABLE IF NOT EXISTS third_party_claims (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    defendant_id         INTEGER NOT NULL REFERENCES defendants(id),
    insurance_company_id INTEGER NOT NULL REFERENCES insurance_companies(id),
    claim_number         TEXT NOT NULL DEFAULT '',
    lor_sent             INTEGER NOT NULL DEFAULT 0,
    loa_received         INTEGER NOT NULL DEFAULT 0,
    amount_claimed       REAL NOT NULL DEFAULT 0,
    amount_settled       REAL NOT NULL DEFAULT 0,
    created_at           TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_third_party_defendant ON third_party_claims (defendant_id);

CREATE TABLE IF NOT EXISTS health_claims (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id            INTEGER NOT NULL REFERENCES clients(id),
    insurance_company_id INTEGER NOT NULL REFERENCES insurance_companies(id),
    member_id            TEXT NOT NULL DEFAULT '',
    created_at           TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_health_claims_client ON health_claims (client_id);

CREATE TABLE IF NOT EXISTS medical_bills (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id          INTEGER NOT NULL REFERENCES clients(id),
    provider_id        INTEGER NOT NULL REFERENCES medical_providers(id),
    billed_amount      REAL NOT NULL DEFAULT 0,
    paid_amount        REAL NOT NULL DEFAULT 0,
    adjusted_amount    REAL NOT NULL DEFAULT 0,
    outstanding_amount REAL NOT NULL DEFAULT 0,
    is_resolved        INTEGER NOT NULL DEFAULT 0,
    records_requested  INTEGER NOT NULL DEFAULT 0,
    records_received   INTEGER NOT NULL DEFAULT 0,
    created_at         TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_medical_bills_client ON medical_bills (client_id);

-- ============================================
-- Work log and API usage log
-- ============================================
CREATE TABLE IF NOT EXISTS work_log (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    casefile_id INTEGER REFERENCES casefiles(id),
    description TEXT NOT NULL,
    author      TEXT NOT NULL,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_work_log_casefile ON work_log (casefile_id);

CREATE TABLE IF NOT EXISTS usage_logs (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    api_key_id    INTEGER REFERENCES api_keys(id),
    endpoint      TEXT NOT NULL,
    method        TEXT NOT NULL,
    status_code   INTEGER NOT NULL,
    duration_ms   INTEGER NOT NULL,
    request_body  TEXT NOT NULL DEFAULT '',
    response_body TEXT NOT NULL DEFAULT '',
    ip_address    TEXT NOT NULL DEFAULT '',
    user_agent    TEXT NOT NULL DEFAULT '',
    created_at    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_usage_logs_key ON usage_logs (api_key_id);
"#;
