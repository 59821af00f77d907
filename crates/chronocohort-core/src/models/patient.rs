//! Patient models.

use serde::{Deserialize, Serialize};

use super::{ValidationError, ValidationResult};

/// Biological sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    M,
    F,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::M, Sex::F];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::M => "M",
            Sex::F => "F",
        }
    }
}

/// Primary cancer site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancerType {
    Breast,
    Lung,
    Colorectal,
    Prostate,
}

impl CancerType {
    pub const ALL: [CancerType; 4] = [
        CancerType::Breast,
        CancerType::Lung,
        CancerType::Colorectal,
        CancerType::Prostate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CancerType::Breast => "breast",
            CancerType::Lung => "lung",
            CancerType::Colorectal => "colorectal",
            CancerType::Prostate => "prostate",
        }
    }
}

/// Disease stage at enrolment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "II")]
    StageII,
    #[serde(rename = "III")]
    StageIII,
    #[serde(rename = "IV")]
    StageIV,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::StageII, Stage::StageIII, Stage::StageIV];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::StageII => "II",
            Stage::StageIII => "III",
            Stage::StageIV => "IV",
        }
    }
}

/// Static demographic and clinical attributes of one synthetic patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Sequence token, `P0000`, `P0001`, ...
    pub patient_id: String,
    /// Age in whole years, 25 to 85
    pub age: u8,
    pub sex: Sex,
    /// ECOG performance status, 0 to 2
    pub ecog_score: u8,
    /// Body-mass index (not clamped)
    pub bmi: f64,
    pub cancer_type: CancerType,
    pub stage: Stage,
    /// Comorbidity count, 0 to 2
    pub comorbidities: u8,
}

impl Patient {
    pub const MIN_AGE: u8 = 25;
    pub const MAX_AGE: u8 = 85;
    pub const MAX_ECOG: u8 = 2;
    pub const MAX_COMORBIDITIES: u8 = 2;

    /// Build a patient, rejecting attributes outside their clinical ranges.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        patient_id: String,
        age: u8,
        sex: Sex,
        ecog_score: u8,
        bmi: f64,
        cancer_type: CancerType,
        stage: Stage,
        comorbidities: u8,
    ) -> ValidationResult<Self> {
        if patient_id.is_empty() {
            return Err(ValidationError::Invalid {
                field: "patient_id",
                reason: "must not be empty".into(),
            });
        }
        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&age) {
            return Err(ValidationError::OutOfRange {
                field: "age",
                value: f64::from(age),
                range: "[25, 85]",
            });
        }
        if ecog_score > Self::MAX_ECOG {
            return Err(ValidationError::OutOfRange {
                field: "ecog_score",
                value: f64::from(ecog_score),
                range: "{0, 1, 2}",
            });
        }
        if comorbidities > Self::MAX_COMORBIDITIES {
            return Err(ValidationError::OutOfRange {
                field: "comorbidities",
                value: f64::from(comorbidities),
                range: "{0, 1, 2}",
            });
        }
        if !bmi.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "bmi",
                value: bmi,
            });
        }

        Ok(Self {
            patient_id,
            age,
            sex,
            ecog_score,
            bmi,
            cancer_type,
            stage,
            comorbidities,
        })
    }

    /// Zero-padded sequence token for the patient at `index`.
    pub fn format_id(index: usize) -> String {
        format!("P{:04}", index)
    }
}
