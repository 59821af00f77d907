//! Generation parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::{circadian_date, cycle_date};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameters of one generation run.
///
/// Missing fields in a config file fall back to the defaults
/// (200 patients, 4 treatments each, 30 circadian days, seed 42).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    /// Number of patients; 0 produces an empty cohort
    pub n_patients: usize,
    /// Treatment episodes per patient, at least 1
    pub n_treatments: usize,
    /// Days of actigraphy history per patient, at least 1
    pub n_days_circadian: usize,
    /// Seed of the random stream
    pub seed: u64,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            n_patients: 200,
            n_treatments: 4,
            n_days_circadian: 30,
            seed: 42,
        }
    }
}

impl CohortConfig {
    /// Reject parameters that would produce degenerate cohorts or dates
    /// past the representable calendar.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.n_treatments == 0 {
            return Err(ConfigError::Invalid(
                "n_treatments must be at least 1".into(),
            ));
        }
        if self.n_days_circadian == 0 {
            return Err(ConfigError::Invalid(
                "n_days_circadian must be at least 1".into(),
            ));
        }
        let last_cycle = u32::try_from(self.n_treatments - 1)
            .ok()
            .and_then(cycle_date);
        if last_cycle.is_none() {
            return Err(ConfigError::Invalid(format!(
                "n_treatments too large: {} cycles run past the calendar",
                self.n_treatments
            )));
        }
        if circadian_date(self.n_days_circadian - 1).is_none() {
            return Err(ConfigError::Invalid(format!(
                "n_days_circadian too large: {} days run past the calendar",
                self.n_days_circadian
            )));
        }
        Ok(())
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::generator::{
        CohortGenerator, GenerateError, CIRCADIAN_START_DATE, TREATMENT_ANCHOR_DATE,
    };

    #[test]
    fn test_defaults() {
        let config = CohortConfig::default();
        assert_eq!(config.n_patients, 200);
        assert_eq!(config.n_treatments, 4);
        assert_eq!(config.n_days_circadian, 30);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_patients_allowed() {
        let config = CohortConfig {
            n_patients: 0,
            ..CohortConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_treatments_rejected() {
        let config = CohortConfig {
            n_treatments: 0,
            ..CohortConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_days_rejected() {
        let config = CohortConfig {
            n_days_circadian: 0,
            ..CohortConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_treatment_count_at_calendar_limit() {
        // Last cycle plus its day +14 labs must stay on the calendar
        let days = (NaiveDate::MAX - TREATMENT_ANCHOR_DATE).num_days() - 14;
        let max_treatments = usize::try_from(days / 21 + 1).unwrap();

        let at_limit = CohortConfig {
            n_treatments: max_treatments,
            ..CohortConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let past_limit = CohortConfig {
            n_treatments: max_treatments + 1,
            ..CohortConfig::default()
        };
        assert!(matches!(past_limit.validate(), Err(ConfigError::Invalid(_))));

        let huge = CohortConfig {
            n_treatments: usize::MAX,
            ..CohortConfig::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_circadian_days_at_calendar_limit() {
        // The last night's sleep window may end the following morning
        let max_days = usize::try_from((NaiveDate::MAX - CIRCADIAN_START_DATE).num_days()).unwrap();

        let at_limit = CohortConfig {
            n_days_circadian: max_days,
            ..CohortConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let past_limit = CohortConfig {
            n_days_circadian: max_days + 1,
            ..CohortConfig::default()
        };
        assert!(matches!(past_limit.validate(), Err(ConfigError::Invalid(_))));

        let huge = CohortConfig {
            n_days_circadian: 200_000_000,
            ..CohortConfig::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_generator_rejects_calendar_overflow() {
        let config = CohortConfig {
            n_patients: 1,
            n_treatments: 5_000_000,
            ..CohortConfig::default()
        };
        assert!(matches!(
            CohortGenerator::new(config),
            Err(GenerateError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CohortConfig = serde_json::from_str(r#"{"n_patients": 10, "seed": 7}"#).unwrap();
        assert_eq!(config.n_patients, 10);
        assert_eq!(config.seed, 7);
        assert_eq!(config.n_treatments, 4);
    }

    #[test]
    fn test_negative_count_is_malformed() {
        let result: Result<CohortConfig, _> = serde_json::from_str(r#"{"n_patients": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cohort.json");
        std::fs::write(&path, r#"{"n_treatments": 0}"#).unwrap();
        assert!(matches!(
            CohortConfig::from_json_file(&path),
            Err(ConfigError::Invalid(_))
        ));

        std::fs::write(&path, r#"{"n_treatments": 2}"#).unwrap();
        assert_eq!(CohortConfig::from_json_file(&path).unwrap().n_treatments, 2);
    }
}
