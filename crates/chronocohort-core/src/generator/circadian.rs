//! Circadian profile and actigraphy synthesis.

use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{Days, Duration, NaiveDate, NaiveTime};

use super::{GenerateError, GenerateResult};
use crate::models::{
    ActigraphySample, CircadianProfile, HourOfDay, SleepDuration, SleepInterval, HOURS_PER_DAY,
};
use crate::random::RandomStream;

/// First simulated day of actigraphy.
pub const CIRCADIAN_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(date) => date,
    None => panic!("invalid circadian start date"),
};

/// Date of simulated day `day` (0-based).
///
/// `None` when that day, or the morning after it where its sleep window may
/// end, falls past the representable calendar.
pub fn circadian_date(day: usize) -> Option<NaiveDate> {
    let offset = u64::try_from(day).ok()?;
    let date = CIRCADIAN_START_DATE.checked_add_days(Days::new(offset))?;
    date.succ_opt()?;
    Some(date)
}

const MIDPOINT_MEAN: f64 = 3.0;
const MIDPOINT_SD: f64 = 1.5;
const DURATION_MEAN: f64 = 7.5;
const DURATION_SD: f64 = 1.0;

/// Mean activity while asleep.
const SLEEP_ACTIVITY_MEAN: f64 = 5.0;
const WAKE_ACTIVITY_MEAN: f64 = 50.0;
const WAKE_ACTIVITY_AMPLITUDE: f64 = 30.0;
const WAKE_ACTIVITY_SD: f64 = 10.0;

const SLEEP_HR_MEAN: f64 = 55.0;
const SLEEP_HR_SD: f64 = 5.0;
const WAKE_HR_MEAN: f64 = 70.0;
const WAKE_HR_SD: f64 = 10.0;

/// Baseline waking activity `hours_since_wake` hours after sleep offset.
pub fn wake_activity_baseline(hours_since_wake: f64) -> f64 {
    WAKE_ACTIVITY_MEAN
        + WAKE_ACTIVITY_AMPLITUDE * (TAU * hours_since_wake / HOURS_PER_DAY + FRAC_PI_2).sin()
}

/// Synthesizes a patient's sleep phase, hourly actigraphy and nightly sleep windows.
pub struct CircadianGenerator {
    n_days: usize,
}

impl CircadianGenerator {
    pub fn new(n_days: usize) -> Self {
        Self { n_days }
    }

    pub fn generate(&self, rng: &mut RandomStream, patient_id: &str) -> GenerateResult<CircadianProfile> {
        let sleep_midpoint = HourOfDay::wrapping(rng.normal(MIDPOINT_MEAN, MIDPOINT_SD))?;
        let sleep_duration = SleepDuration::new(
            rng.normal(DURATION_MEAN, DURATION_SD)
                .clamp(SleepDuration::MIN_HOURS, SleepDuration::MAX_HOURS),
        )?;
        let interval = SleepInterval::from_phase(sleep_midpoint, sleep_duration)?;

        if let Some(last_day) = self.n_days.checked_sub(1) {
            if circadian_date(last_day).is_none() {
                return Err(GenerateError::DateOutOfRange(format!(
                    "{} circadian days",
                    self.n_days
                )));
            }
        }

        let mut actigraphy = Vec::with_capacity(self.n_days * 24);
        let mut sleep_windows = Vec::with_capacity(self.n_days);

        for day in 0..self.n_days {
            let date = circadian_date(day).ok_or_else(|| {
                GenerateError::DateOutOfRange(format!("circadian day {}", day + 1))
            })?;
            sleep_windows.push(interval.window_on(date));

            let midnight = date.and_time(NaiveTime::MIN);
            for hour in 0..24u32 {
                let hour_of_day = f64::from(hour);
                let asleep = interval.contains(hour_of_day);

                let activity = if asleep {
                    rng.exponential(SLEEP_ACTIVITY_MEAN)
                } else {
                    let since_wake = (hour_of_day - interval.end.value()).rem_euclid(HOURS_PER_DAY);
                    rng.normal(wake_activity_baseline(since_wake), WAKE_ACTIVITY_SD)
                        .max(0.0)
                };

                let heart_rate = if asleep {
                    rng.normal(SLEEP_HR_MEAN, SLEEP_HR_SD)
                } else {
                    rng.normal(WAKE_HR_MEAN, WAKE_HR_SD)
                };

                actigraphy.push(ActigraphySample::new(
                    midnight + Duration::hours(i64::from(hour)),
                    activity,
                    heart_rate,
                )?);
            }
        }

        Ok(CircadianProfile {
            patient_id: patient_id.to_string(),
            sleep_midpoint,
            sleep_duration,
            actigraphy,
            sleep_windows,
        })
    }
}
