//! SQLite sink: the whole cohort in one database file.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Transaction};
use tracing::{debug, info};

use super::{
    CohortSink, RunSummary, SinkError, SinkReport, SinkResult, CIRCADIAN_ARTIFACT, COHORT_TABLES,
    DEMOGRAPHICS_ARTIFACT, LABS_ARTIFACT, SCHEMA, SUMMARY_ARTIFACT, TREATMENTS_ARTIFACT,
};
use crate::models::{CircadianProfile, Cohort, LabRecord, Patient, TreatmentEpisode};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// SQLite connection wrapper holding one cohort at a time.
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open database at path, creating it and its parent directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> SinkResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let sink = Self { conn };
        sink.initialize()?;
        Ok(sink)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        let sink = Self { conn };
        sink.initialize()?;
        Ok(sink)
    }

    /// Initialize schema.
    fn initialize(&self) -> SinkResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for queries over the stored cohort).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Number of rows in one of the cohort tables.
    pub fn count_rows(&self, table: &str) -> SinkResult<i64> {
        // Only known table names are interpolated
        let table = COHORT_TABLES
            .iter()
            .find(|t| **t == table)
            .ok_or_else(|| SinkError::UnknownTable(table.to_string()))?;
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count)
    }

    /// Summary of the stored cohort, if one has been written.
    pub fn stored_summary(&self) -> SinkResult<Option<RunSummary>> {
        let mut stmt = self
            .conn
            .prepare("SELECT summary_json FROM run_summary WHERE id = 1")?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => {
                let json: String = row.get(0)?;
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => Ok(None),
        }
    }
}

fn clear_tables(tx: &Transaction<'_>) -> SinkResult<()> {
    for table in COHORT_TABLES {
        tx.execute(&format!("DELETE FROM {}", table), [])?;
    }
    Ok(())
}

fn insert_patients(tx: &Transaction<'_>, patients: &[Patient]) -> SinkResult<()> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO patients (
            patient_id, age, sex, ecog_score, bmi, cancer_type, stage, comorbidities
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )?;
    for patient in patients {
        stmt.execute(params![
            patient.patient_id,
            patient.age,
            patient.sex.as_str(),
            patient.ecog_score,
            patient.bmi,
            patient.cancer_type.as_str(),
            patient.stage.as_str(),
            patient.comorbidities,
        ])?;
    }
    Ok(())
}

fn insert_profiles(tx: &Transaction<'_>, profiles: &[CircadianProfile]) -> SinkResult<()> {
    let mut profile_stmt = tx.prepare(
        "INSERT INTO circadian_profiles (patient_id, sleep_midpoint, sleep_duration) VALUES (?1, ?2, ?3)",
    )?;
    let mut sample_stmt = tx.prepare(
        "INSERT INTO actigraphy (patient_id, timestamp, activity, hr) VALUES (?1, ?2, ?3, ?4)",
    )?;
    let mut window_stmt = tx.prepare(
        "INSERT INTO sleep_windows (patient_id, sleep_start, sleep_end) VALUES (?1, ?2, ?3)",
    )?;

    for profile in profiles {
        profile_stmt.execute(params![
            profile.patient_id,
            profile.sleep_midpoint.value(),
            profile.sleep_duration.hours(),
        ])?;
        for sample in &profile.actigraphy {
            sample_stmt.execute(params![
                profile.patient_id,
                format_timestamp(&sample.timestamp),
                sample.activity,
                sample.heart_rate,
            ])?;
        }
        for window in &profile.sleep_windows {
            window_stmt.execute(params![
                profile.patient_id,
                format_timestamp(&window.sleep_start),
                format_timestamp(&window.sleep_end),
            ])?;
        }
    }
    Ok(())
}

fn insert_treatments(tx: &Transaction<'_>, treatments: &[TreatmentEpisode]) -> SinkResult<()> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO treatments (
            treatment_id, patient_id, cycle, treatment_date, treatment_hour, drug_type,
            dose, efficacy_score, toxicity_score, response, toxicity_grade, tumor_shrinkage_pct
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
    )?;
    for episode in treatments {
        stmt.execute(params![
            episode.treatment_id,
            episode.patient_id,
            episode.cycle,
            episode.treatment_date.to_string(),
            episode.treatment_hour.value(),
            episode.drug_type.as_str(),
            episode.dose.value(),
            episode.efficacy_score.value(),
            episode.toxicity_score.value(),
            u8::from(episode.response),
            episode.toxicity_grade.as_u8(),
            episode.tumor_shrinkage_pct.value(),
        ])?;
    }
    Ok(())
}

fn insert_labs(tx: &Transaction<'_>, labs: &[LabRecord]) -> SinkResult<()> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO labs (
            patient_id, treatment_id, phase, day_offset, date,
            wbc, hemoglobin, platelets, creatinine, alt
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
    )?;
    for lab in labs {
        stmt.execute(params![
            lab.patient_id,
            lab.treatment_id,
            lab.phase.as_str(),
            lab.day_offset,
            lab.date.to_string(),
            lab.wbc,
            lab.hemoglobin,
            lab.platelets,
            lab.creatinine,
            lab.alt,
        ])?;
    }
    Ok(())
}

impl CohortSink for SqliteSink {
    fn write_cohort(&mut self, cohort: &Cohort) -> SinkResult<SinkReport> {
        let summary = RunSummary::from_cohort(cohort)?;

        let tx = self.conn.transaction()?;
        clear_tables(&tx)?;
        insert_patients(&tx, cohort.demographics())?;
        insert_profiles(&tx, cohort.circadian_profiles())?;
        insert_treatments(&tx, cohort.treatments())?;
        insert_labs(&tx, cohort.labs())?;
        tx.execute(
            "INSERT INTO run_summary (id, summary_json, digest_root) VALUES (1, ?1, ?2)",
            params![summary.to_json()?, summary.digest.root],
        )?;
        tx.commit()?;

        debug!(tables = COHORT_TABLES.len(), "Committed cohort transaction");
        info!(
            n_patients = summary.n_patients,
            n_treatments = summary.n_treatments,
            n_labs = summary.n_labs,
            "Saved cohort to SQLite"
        );

        Ok(SinkReport {
            artifacts: vec![
                format!("table:{}", DEMOGRAPHICS_ARTIFACT),
                format!("table:{}", TREATMENTS_ARTIFACT),
                format!("table:{}", LABS_ARTIFACT),
                format!("table:{}", CIRCADIAN_ARTIFACT),
                format!("table:{}", SUMMARY_ARTIFACT),
            ],
            summary,
        })
    }
}
