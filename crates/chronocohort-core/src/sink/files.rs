//! Directory sink: CSV tables plus JSON for nested data.
//!
//! Layout:
//!
//! ```text
//! <root>/demographics.csv
//! <root>/treatments.csv
//! <root>/labs.csv
//! <root>/circadian_profiles.json
//! <root>/summary.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::{
    CohortSink, RunSummary, SinkReport, SinkResult, CIRCADIAN_ARTIFACT, DEMOGRAPHICS_ARTIFACT,
    LABS_ARTIFACT, SUMMARY_ARTIFACT, TREATMENTS_ARTIFACT,
};
use crate::models::{Cohort, LabRecord, Patient, TreatmentEpisode};

/// A record written as one CSV row.
///
/// `COLUMNS` lists the serialized field names in order, so an empty table
/// still gets a header line.
pub trait CsvRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl CsvRow for Patient {
    const COLUMNS: &'static [&'static str] = &[
        "patient_id",
        "age",
        "sex",
        "ecog_score",
        "bmi",
        "cancer_type",
        "stage",
        "comorbidities",
    ];
}

impl CsvRow for TreatmentEpisode {
    const COLUMNS: &'static [&'static str] = &[
        "patient_id",
        "treatment_id",
        "cycle",
        "treatment_date",
        "treatment_hour",
        "drug_type",
        "dose",
        "efficacy_score",
        "toxicity_score",
        "response",
        "toxicity_grade",
        "tumor_shrinkage_pct",
    ];
}

impl CsvRow for LabRecord {
    const COLUMNS: &'static [&'static str] = &[
        "patient_id",
        "treatment_id",
        "phase",
        "day_offset",
        "date",
        "wbc",
        "hemoglobin",
        "platelets",
        "creatinine",
        "alt",
    ];
}

/// Writes a cohort as flat files under one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn write_csv<T: CsvRow>(&self, artifact: &str, rows: &[T]) -> SinkResult<PathBuf> {
        let path = self.root.join(format!("{}.csv", artifact));
        let mut writer = csv::Writer::from_path(&path)?;
        if rows.is_empty() {
            writer.write_record(T::COLUMNS)?;
        }
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        debug!(path = %path.display(), rows = rows.len(), "Wrote table");
        Ok(path)
    }

    fn write_json<T: Serialize + ?Sized>(&self, artifact: &str, value: &T) -> SinkResult<PathBuf> {
        let path = self.root.join(format!("{}.json", artifact));
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        debug!(path = %path.display(), "Wrote document");
        Ok(path)
    }
}

impl CohortSink for DirectorySink {
    fn write_cohort(&mut self, cohort: &Cohort) -> SinkResult<SinkReport> {
        fs::create_dir_all(&self.root)?;

        let summary = RunSummary::from_cohort(cohort)?;
        let paths = [
            self.write_csv(DEMOGRAPHICS_ARTIFACT, cohort.demographics())?,
            self.write_csv(TREATMENTS_ARTIFACT, cohort.treatments())?,
            self.write_csv(LABS_ARTIFACT, cohort.labs())?,
            self.write_json(CIRCADIAN_ARTIFACT, cohort.circadian_profiles())?,
            self.write_json(SUMMARY_ARTIFACT, &summary)?,
        ];

        info!(
            root = %self.root.display(),
            n_patients = summary.n_patients,
            n_treatments = summary.n_treatments,
            n_labs = summary.n_labs,
            "Saved cohort"
        );

        Ok(SinkReport {
            artifacts: paths.iter().map(|p| p.display().to_string()).collect(),
            summary,
        })
    }
}

/// Read `summary.json` back from a directory written by [`DirectorySink`].
pub fn read_summary<P: AsRef<Path>>(root: P) -> SinkResult<RunSummary> {
    let path = root.as_ref().join(format!("{}.json", SUMMARY_ARTIFACT));
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
