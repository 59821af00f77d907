//! Circadian profile models.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{HourOfDay, SleepDuration, ValidationError, ValidationResult};

/// Habitual sleep interval on the 24h circle. May wrap past midnight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepInterval {
    pub start: HourOfDay,
    pub end: HourOfDay,
}

impl SleepInterval {
    /// Center a sleep interval of `duration` on `midpoint`.
    pub fn from_phase(midpoint: HourOfDay, duration: SleepDuration) -> ValidationResult<Self> {
        let half = duration.hours() / 2.0;
        Ok(Self {
            start: midpoint.shifted(-half)?,
            end: midpoint.shifted(half)?,
        })
    }

    /// True when the interval runs through midnight (start numerically after end).
    pub fn wraps_midnight(&self) -> bool {
        self.start.value() >= self.end.value()
    }

    /// Is `hour` inside the sleep interval? Start inclusive, end exclusive.
    pub fn contains(&self, hour: f64) -> bool {
        let (start, end) = (self.start.value(), self.end.value());
        if start < end {
            start <= hour && hour < end
        } else {
            hour >= start || hour < end
        }
    }

    /// Materialize the interval as timestamps for the night starting on `date`.
    pub fn window_on(&self, date: NaiveDate) -> SleepWindow {
        let sleep_start = at_clock_time(date, self.start);
        let mut sleep_end = at_clock_time(date, self.end);
        if sleep_end < sleep_start {
            sleep_end += Duration::days(1);
        }
        SleepWindow {
            sleep_start,
            sleep_end,
        }
    }
}

/// Timestamp on `date` at the hour and minute of `hour` (seconds dropped).
fn at_clock_time(date: NaiveDate, hour: HourOfDay) -> NaiveDateTime {
    let (h, m) = hour.hour_minute();
    date.and_time(NaiveTime::MIN) + Duration::minutes(i64::from(h) * 60 + i64::from(m))
}

/// One hourly actigraphy sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActigraphySample {
    pub timestamp: NaiveDateTime,
    /// Activity counts, never negative
    pub activity: f64,
    /// Heart rate in beats per minute
    #[serde(rename = "hr")]
    pub heart_rate: f64,
}

impl ActigraphySample {
    pub fn new(timestamp: NaiveDateTime, activity: f64, heart_rate: f64) -> ValidationResult<Self> {
        if !activity.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "activity",
                value: activity,
            });
        }
        if activity < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "activity",
                value: activity,
                range: "[0, inf)",
            });
        }
        if !heart_rate.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "hr",
                value: heart_rate,
            });
        }
        Ok(Self {
            timestamp,
            activity,
            heart_rate,
        })
    }
}

/// Sleep onset and offset for one simulated night.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepWindow {
    pub sleep_start: NaiveDateTime,
    pub sleep_end: NaiveDateTime,
}

impl SleepWindow {
    pub fn duration(&self) -> Duration {
        self.sleep_end - self.sleep_start
    }
}

/// Latent circadian phase of a patient plus the signals derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CircadianProfile {
    pub patient_id: String,
    pub sleep_midpoint: HourOfDay,
    pub sleep_duration: SleepDuration,
    /// Hourly samples, 24 per simulated day
    pub actigraphy: Vec<ActigraphySample>,
    /// One window per simulated day
    #[serde(rename = "sleep_data")]
    pub sleep_windows: Vec<SleepWindow>,
}

impl CircadianProfile {
    /// Sleep interval implied by the profile's phase and duration.
    pub fn sleep_interval(&self) -> ValidationResult<SleepInterval> {
        SleepInterval::from_phase(self.sleep_midpoint, self.sleep_duration)
    }

    /// Number of simulated days.
    pub fn n_days(&self) -> usize {
        self.sleep_windows.len()
    }
}
