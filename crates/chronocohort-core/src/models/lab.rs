//! Laboratory record models.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::TreatmentEpisode;

/// Draw days relative to the treatment date, before administration.
pub const PRE_TREATMENT_OFFSETS: [i64; 3] = [-7, -3, -1];

/// Draw days relative to the treatment date, after administration.
pub const POST_TREATMENT_OFFSETS: [i64; 3] = [3, 7, 14];

/// Whether a lab draw precedes or follows its treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabPhase {
    Pre,
    Post,
}

impl LabPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabPhase::Pre => "pre",
            LabPhase::Post => "post",
        }
    }

    pub fn offsets(&self) -> [i64; 3] {
        match self {
            LabPhase::Pre => PRE_TREATMENT_OFFSETS,
            LabPhase::Post => POST_TREATMENT_OFFSETS,
        }
    }
}

/// Values of one blood panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabPanel {
    /// White-cell count, 10^9/L
    pub wbc: f64,
    /// g/dL
    pub hemoglobin: f64,
    /// 10^9/L
    pub platelets: f64,
    /// mg/dL
    pub creatinine: f64,
    /// Alanine transaminase, U/L
    pub alt: f64,
}

/// One lab draw anchored to a treatment episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabRecord {
    pub patient_id: String,
    pub treatment_id: String,
    pub phase: LabPhase,
    /// Days from the treatment date
    pub day_offset: i64,
    pub date: NaiveDate,
    pub wbc: f64,
    pub hemoglobin: f64,
    pub platelets: f64,
    pub creatinine: f64,
    pub alt: f64,
}

impl LabRecord {
    /// Attach a panel to `episode`, dated `day_offset` days from its treatment date.
    pub fn for_episode(
        episode: &TreatmentEpisode,
        phase: LabPhase,
        day_offset: i64,
        panel: LabPanel,
    ) -> Self {
        Self {
            patient_id: episode.patient_id.clone(),
            treatment_id: episode.treatment_id.clone(),
            phase,
            day_offset,
            date: episode.treatment_date + Duration::days(day_offset),
            wbc: panel.wbc,
            hemoglobin: panel.hemoglobin,
            platelets: panel.platelets,
            creatinine: panel.creatinine,
            alt: panel.alt,
        }
    }
}
