//! Persistence of generated cohorts.
//!
//! Generation never touches the filesystem; a finished [`Cohort`] is handed
//! to a [`CohortSink`], which stores the four artifacts (demographics,
//! treatments, labs, circadian profiles) and a run summary.

mod files;
mod memory;
mod schema;
mod sqlite;

pub use files::*;
pub use memory::*;
pub use schema::*;
pub use sqlite::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::digest::CohortDigest;
use crate::models::Cohort;

/// Artifact names, shared by every sink.
pub const DEMOGRAPHICS_ARTIFACT: &str = "demographics";
pub const TREATMENTS_ARTIFACT: &str = "treatments";
pub const LABS_ARTIFACT: &str = "labs";
pub const CIRCADIAN_ARTIFACT: &str = "circadian_profiles";
pub const SUMMARY_ARTIFACT: &str = "summary";

/// Sink errors.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Run summary stored next to every cohort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub n_patients: usize,
    pub n_treatments: usize,
    pub n_labs: usize,
    pub seed: u64,
    pub n_treatments_per_patient: usize,
    pub n_days_circadian: usize,
    pub digest: CohortDigest,
}

impl RunSummary {
    pub fn from_cohort(cohort: &Cohort) -> SinkResult<Self> {
        let counts = cohort.summary();
        let config = cohort.config();
        Ok(Self {
            n_patients: counts.n_patients,
            n_treatments: counts.n_treatments,
            n_labs: counts.n_labs,
            seed: config.seed,
            n_treatments_per_patient: config.n_treatments,
            n_days_circadian: config.n_days_circadian,
            digest: cohort.digest()?,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// What a sink wrote.
#[derive(Debug, Clone)]
pub struct SinkReport {
    /// Where each artifact ended up (file path, or table name)
    pub artifacts: Vec<String>,
    pub summary: RunSummary,
}

/// Destination for a finished cohort.
pub trait CohortSink {
    /// Persist every artifact of `cohort`. Replaces anything previously written.
    fn write_cohort(&mut self, cohort: &Cohort) -> SinkResult<SinkReport>;
}
