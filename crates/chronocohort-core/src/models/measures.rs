//! Range-checked numeric measures.
//!
//! Each measure can only be built through a constructor that checks its
//! range, so records holding them are valid by construction. Serialized as a
//! plain number; deserializing re-runs the check.

use serde::{Deserialize, Serialize};

use super::{ValidationError, ValidationResult};

/// Length of the circadian cycle in hours.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Efficacy above this value counts as a tumor response (strict inequality).
pub const RESPONSE_THRESHOLD: f64 = 0.6;

/// Toxicity score breakpoints for grades 1 through 4.
pub const TOXICITY_GRADE_BREAKPOINTS: [f64; 4] = [0.3, 0.5, 0.7, 0.85];

fn check_finite(field: &'static str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite { field, value })
    }
}

fn check_closed(
    field: &'static str,
    value: f64,
    low: f64,
    high: f64,
    range: &'static str,
) -> ValidationResult<f64> {
    check_finite(field, value)?;
    if (low..=high).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange { field, value, range })
    }
}

/// Clock hour on the 24h circle, in `[0, 24)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct HourOfDay(f64);

impl HourOfDay {
    /// Accept an hour already in `[0, 24)`.
    pub fn new(value: f64) -> ValidationResult<Self> {
        check_finite("hour_of_day", value)?;
        if (0.0..HOURS_PER_DAY).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfRange {
                field: "hour_of_day",
                value,
                range: "[0, 24)",
            })
        }
    }

    /// Wrap any finite hour onto the circle (`-1.0` becomes `23.0`).
    pub fn wrapping(value: f64) -> ValidationResult<Self> {
        check_finite("hour_of_day", value)?;
        let wrapped = value.rem_euclid(HOURS_PER_DAY);
        // rem_euclid rounds tiny negatives up to exactly 24.0
        if wrapped >= HOURS_PER_DAY {
            Ok(Self(0.0))
        } else {
            Ok(Self(wrapped))
        }
    }

    /// Shift around the circle by `hours`.
    pub fn shifted(self, hours: f64) -> ValidationResult<Self> {
        Self::wrapping(self.0 + hours)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole hours and whole minutes, truncated (`7.75` is `(7, 45)`).
    pub fn hour_minute(self) -> (u32, u32) {
        let whole = self.0.trunc();
        let minutes = ((self.0 - whole) * 60.0).trunc();
        (whole as u32, (minutes as u32).min(59))
    }
}

impl TryFrom<f64> for HourOfDay {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HourOfDay> for f64 {
    fn from(hour: HourOfDay) -> Self {
        hour.0
    }
}

/// Habitual sleep duration in hours, in `[5, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SleepDuration(f64);

impl SleepDuration {
    pub const MIN_HOURS: f64 = 5.0;
    pub const MAX_HOURS: f64 = 10.0;

    pub fn new(hours: f64) -> ValidationResult<Self> {
        check_closed("sleep_duration", hours, Self::MIN_HOURS, Self::MAX_HOURS, "[5, 10]").map(Self)
    }

    pub fn hours(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SleepDuration {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SleepDuration> for f64 {
    fn from(duration: SleepDuration) -> Self {
        duration.0
    }
}

/// Score in `[0, 1]` (efficacy, toxicity).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UnitScore(f64);

impl UnitScore {
    pub fn new(value: f64) -> ValidationResult<Self> {
        check_closed("score", value, 0.0, 1.0, "[0, 1]").map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for UnitScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitScore> for f64 {
    fn from(score: UnitScore) -> Self {
        score.0
    }
}

/// Dose relative to the standard dose, in `[0.8, 1.2]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DoseMultiplier(f64);

impl DoseMultiplier {
    pub const MIN: f64 = 0.8;
    pub const MAX: f64 = 1.2;

    pub fn new(value: f64) -> ValidationResult<Self> {
        check_closed("dose", value, Self::MIN, Self::MAX, "[0.8, 1.2]").map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for DoseMultiplier {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DoseMultiplier> for f64 {
    fn from(dose: DoseMultiplier) -> Self {
        dose.0
    }
}

/// Percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub fn new(value: f64) -> ValidationResult<Self> {
        check_closed("percentage", value, 0.0, 100.0, "[0, 100]").map(Self)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percentage {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percentage> for f64 {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

/// Toxicity grade 0 (none) through 4 (life-threatening).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ToxicityGrade {
    Grade0 = 0,
    Grade1 = 1,
    Grade2 = 2,
    Grade3 = 3,
    Grade4 = 4,
}

impl ToxicityGrade {
    /// Step function over the fixed breakpoints 0.3 / 0.5 / 0.7 / 0.85.
    /// A score exactly on a breakpoint belongs to the higher grade.
    pub fn from_score(toxicity: UnitScore) -> Self {
        let [g1, g2, g3, g4] = TOXICITY_GRADE_BREAKPOINTS;
        let t = toxicity.value();
        if t < g1 {
            ToxicityGrade::Grade0
        } else if t < g2 {
            ToxicityGrade::Grade1
        } else if t < g3 {
            ToxicityGrade::Grade2
        } else if t < g4 {
            ToxicityGrade::Grade3
        } else {
            ToxicityGrade::Grade4
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Grade 3 and above.
    pub fn is_severe(self) -> bool {
        self >= ToxicityGrade::Grade3
    }
}

impl TryFrom<u8> for ToxicityGrade {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ToxicityGrade::Grade0),
            1 => Ok(ToxicityGrade::Grade1),
            2 => Ok(ToxicityGrade::Grade2),
            3 => Ok(ToxicityGrade::Grade3),
            4 => Ok(ToxicityGrade::Grade4),
            other => Err(ValidationError::OutOfRange {
                field: "toxicity_grade",
                value: f64::from(other),
                range: "{0, 1, 2, 3, 4}",
            }),
        }
    }
}

impl From<ToxicityGrade> for u8 {
    fn from(grade: ToxicityGrade) -> Self {
        grade.as_u8()
    }
}
