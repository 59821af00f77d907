//! Treatment episode models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    DoseMultiplier, HourOfDay, Percentage, ToxicityGrade, UnitScore, ValidationError,
    ValidationResult, RESPONSE_THRESHOLD,
};

/// Chemotherapy drug class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrugClass {
    Platinum,
    Taxane,
    Anthracycline,
}

impl DrugClass {
    pub const ALL: [DrugClass; 3] = [
        DrugClass::Platinum,
        DrugClass::Taxane,
        DrugClass::Anthracycline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrugClass::Platinum => "platinum",
            DrugClass::Taxane => "taxane",
            DrugClass::Anthracycline => "anthracycline",
        }
    }
}

/// Scores produced by the chronotherapy response model for one episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeOutcome {
    pub efficacy: UnitScore,
    pub toxicity: UnitScore,
    pub tumor_shrinkage: Percentage,
}

/// When and what was given, as chosen by the clinic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSchedule {
    pub date: NaiveDate,
    pub hour: HourOfDay,
    pub drug: DrugClass,
    pub dose: DoseMultiplier,
}

/// One treatment cycle for a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentEpisode {
    pub patient_id: String,
    /// `{patient_id}_T{cycle}`
    pub treatment_id: String,
    /// 1-based index within the patient
    pub cycle: u32,
    pub treatment_date: NaiveDate,
    /// Fractional clock hour of administration
    pub treatment_hour: HourOfDay,
    pub drug_type: DrugClass,
    pub dose: DoseMultiplier,
    pub efficacy_score: UnitScore,
    pub toxicity_score: UnitScore,
    /// 1 iff efficacy > 0.6
    #[serde(with = "flag")]
    pub response: bool,
    pub toxicity_grade: ToxicityGrade,
    pub tumor_shrinkage_pct: Percentage,
}

impl TreatmentEpisode {
    /// Build an episode. Response and grade are derived from the scores so
    /// they cannot disagree with them.
    pub fn new(
        patient_id: &str,
        cycle: u32,
        schedule: EpisodeSchedule,
        outcome: EpisodeOutcome,
    ) -> ValidationResult<Self> {
        if cycle == 0 {
            return Err(ValidationError::Invalid {
                field: "cycle",
                reason: "cycles are numbered from 1".into(),
            });
        }

        Ok(Self {
            patient_id: patient_id.to_string(),
            treatment_id: Self::format_id(patient_id, cycle),
            cycle,
            treatment_date: schedule.date,
            treatment_hour: schedule.hour,
            drug_type: schedule.drug,
            dose: schedule.dose,
            efficacy_score: outcome.efficacy,
            toxicity_score: outcome.toxicity,
            response: is_response(outcome.efficacy),
            toxicity_grade: ToxicityGrade::from_score(outcome.toxicity),
            tumor_shrinkage_pct: outcome.tumor_shrinkage,
        })
    }

    pub fn format_id(patient_id: &str, cycle: u32) -> String {
        format!("{}_T{}", patient_id, cycle)
    }

    /// Check the derived fields of a record that did not come through `new`
    /// (for example one read back from disk).
    pub fn validate(&self) -> ValidationResult<()> {
        if self.response != is_response(self.efficacy_score) {
            return Err(ValidationError::Invalid {
                field: "response",
                reason: format!(
                    "response {} disagrees with efficacy {}",
                    self.response,
                    self.efficacy_score.value()
                ),
            });
        }
        if self.toxicity_grade != ToxicityGrade::from_score(self.toxicity_score) {
            return Err(ValidationError::Invalid {
                field: "toxicity_grade",
                reason: format!(
                    "grade {} disagrees with toxicity {}",
                    self.toxicity_grade.as_u8(),
                    self.toxicity_score.value()
                ),
            });
        }
        if self.treatment_id != Self::format_id(&self.patient_id, self.cycle) {
            return Err(ValidationError::Invalid {
                field: "treatment_id",
                reason: format!("unexpected id {}", self.treatment_id),
            });
        }
        Ok(())
    }
}

/// Tumor response: efficacy strictly above the threshold.
pub fn is_response(efficacy: UnitScore) -> bool {
    efficacy.value() > RESPONSE_THRESHOLD
}

/// Serialize a boolean as the 0/1 integer used in tabular exports.
mod flag {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::custom(format!("expected 0 or 1, got {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_episode(efficacy: f64, toxicity: f64) -> TreatmentEpisode {
        TreatmentEpisode::new(
            "P0000",
            1,
            EpisodeSchedule {
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                hour: HourOfDay::new(13.5).unwrap(),
                drug: DrugClass::Taxane,
                dose: DoseMultiplier::new(1.0).unwrap(),
            },
            EpisodeOutcome {
                efficacy: UnitScore::new(efficacy).unwrap(),
                toxicity: UnitScore::new(toxicity).unwrap(),
                tumor_shrinkage: Percentage::new(efficacy * 100.0).unwrap(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_response_threshold_is_strict() {
        assert!(!make_episode(0.6, 0.2).response);
        assert!(make_episode(0.6000001, 0.2).response);
        assert!(!make_episode(0.59, 0.2).response);
    }

    #[test]
    fn test_grade_derived_from_toxicity() {
        assert_eq!(make_episode(0.5, 0.29).toxicity_grade, ToxicityGrade::Grade0);
        assert_eq!(make_episode(0.5, 0.85).toxicity_grade, ToxicityGrade::Grade4);
    }

    #[test]
    fn test_treatment_id() {
        let episode = make_episode(0.7, 0.4);
        assert_eq!(episode.treatment_id, "P0000_T1");
        assert!(episode.validate().is_ok());
    }

    #[test]
    fn test_cycle_zero_rejected() {
        let episode = make_episode(0.7, 0.4);
        let schedule = EpisodeSchedule {
            date: episode.treatment_date,
            hour: episode.treatment_hour,
            drug: episode.drug_type,
            dose: episode.dose,
        };
        let outcome = EpisodeOutcome {
            efficacy: episode.efficacy_score,
            toxicity: episode.toxicity_score,
            tumor_shrinkage: episode.tumor_shrinkage_pct,
        };
        assert!(TreatmentEpisode::new("P0000", 0, schedule, outcome).is_err());
    }

    #[test]
    fn test_validate_catches_tampering() {
        let mut episode = make_episode(0.7, 0.4);
        episode.response = false;
        assert!(episode.validate().is_err());
    }

    #[test]
    fn test_response_serialized_as_flag() {
        let json = serde_json::to_string(&make_episode(0.7, 0.4)).unwrap();
        assert!(json.contains("\"response\":1"));
        assert!(json.contains("\"toxicity_grade\":1"));
        assert!(json.contains("\"treatment_date\":\"2024-01-15\""));
        let back: TreatmentEpisode = serde_json::from_str(&json).unwrap();
        assert!(back.response);
    }
}
