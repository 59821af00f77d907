//! SQLite schema definition.

/// Complete database schema for a persisted cohort.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    age INTEGER NOT NULL CHECK (age BETWEEN 25 AND 85),
    sex TEXT NOT NULL CHECK (sex IN ('M', 'F')),
    ecog_score INTEGER NOT NULL CHECK (ecog_score BETWEEN 0 AND 2),
    bmi REAL NOT NULL,
    cancer_type TEXT NOT NULL,
    stage TEXT NOT NULL CHECK (stage IN ('II', 'III', 'IV')),
    comorbidities INTEGER NOT NULL CHECK (comorbidities BETWEEN 0 AND 2)
);

-- ============================================================================
-- Circadian Profiles
-- ============================================================================

CREATE TABLE IF NOT EXISTS circadian_profiles (
    patient_id TEXT PRIMARY KEY REFERENCES patients(patient_id) ON DELETE CASCADE,
    sleep_midpoint REAL NOT NULL CHECK (sleep_midpoint >= 0 AND sleep_midpoint < 24),
    sleep_duration REAL NOT NULL CHECK (sleep_duration BETWEEN 5 AND 10)
);

CREATE TABLE IF NOT EXISTS actigraphy (
    patient_id TEXT NOT NULL REFERENCES patients(patient_id) ON DELETE CASCADE,
    timestamp TEXT NOT NULL,                      -- ISO 8601, hourly
    activity REAL NOT NULL CHECK (activity >= 0),
    hr REAL NOT NULL,
    PRIMARY KEY (patient_id, timestamp)
);

CREATE TABLE IF NOT EXISTS sleep_windows (
    patient_id TEXT NOT NULL REFERENCES patients(patient_id) ON DELETE CASCADE,
    sleep_start TEXT NOT NULL,
    sleep_end TEXT NOT NULL,
    PRIMARY KEY (patient_id, sleep_start)
);

-- ============================================================================
-- Treatments
-- ============================================================================

CREATE TABLE IF NOT EXISTS treatments (
    treatment_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id) ON DELETE CASCADE,
    cycle INTEGER NOT NULL CHECK (cycle >= 1),
    treatment_date TEXT NOT NULL,                 -- YYYY-MM-DD
    treatment_hour REAL NOT NULL,
    drug_type TEXT NOT NULL,
    dose REAL NOT NULL,
    efficacy_score REAL NOT NULL CHECK (efficacy_score BETWEEN 0 AND 1),
    toxicity_score REAL NOT NULL CHECK (toxicity_score BETWEEN 0 AND 1),
    response INTEGER NOT NULL CHECK (response IN (0, 1)),
    toxicity_grade INTEGER NOT NULL CHECK (toxicity_grade BETWEEN 0 AND 4),
    tumor_shrinkage_pct REAL NOT NULL CHECK (tumor_shrinkage_pct BETWEEN 0 AND 100)
);

CREATE INDEX IF NOT EXISTS idx_treatments_patient ON treatments(patient_id);

-- ============================================================================
-- Labs
-- ============================================================================

CREATE TABLE IF NOT EXISTS labs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id) ON DELETE CASCADE,
    treatment_id TEXT NOT NULL REFERENCES treatments(treatment_id) ON DELETE CASCADE,
    phase TEXT NOT NULL CHECK (phase IN ('pre', 'post')),
    day_offset INTEGER NOT NULL,
    date TEXT NOT NULL,
    wbc REAL NOT NULL,
    hemoglobin REAL NOT NULL,
    platelets REAL NOT NULL,
    creatinine REAL NOT NULL,
    alt REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_labs_treatment ON labs(treatment_id);

-- ============================================================================
-- Run Summary (single row)
-- ============================================================================

CREATE TABLE IF NOT EXISTS run_summary (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    summary_json TEXT NOT NULL,
    digest_root TEXT NOT NULL,
    written_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// Tables cleared before a cohort is written, children first.
pub const COHORT_TABLES: [&str; 7] = [
    "labs",
    "treatments",
    "sleep_windows",
    "actigraphy",
    "circadian_profiles",
    "patients",
    "run_summary",
];
