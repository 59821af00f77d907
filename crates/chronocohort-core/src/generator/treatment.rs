//! Treatment timing and chronotherapy response model.
//!
//! Efficacy peaks when a dose lands near `sleep_midpoint + 5h`; toxicity
//! peaks near `sleep_midpoint + 2h`. Treatment time itself is chosen by the
//! clinic's habits, not by the patient's biology, so many episodes land away
//! from both windows.

use chrono::{Days, NaiveDate};

use super::{circular_distance, phase_proximity, GenerateError, GenerateResult};
use crate::models::{
    CircadianProfile, DoseMultiplier, DrugClass, EpisodeOutcome, EpisodeSchedule, HourOfDay,
    Percentage, TreatmentEpisode, UnitScore, POST_TREATMENT_OFFSETS,
};
use crate::random::RandomStream;

/// Date of the first treatment cycle.
pub const TREATMENT_ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 15) {
    Some(date) => date,
    None => panic!("invalid treatment anchor date"),
};

/// Days between consecutive cycles.
pub const CYCLE_LENGTH_DAYS: i64 = 21;

/// Date of cycle `index` (0-based).
///
/// `None` when the cycle, or its last follow-up lab draw, falls past the
/// representable calendar.
pub fn cycle_date(index: u32) -> Option<NaiveDate> {
    let offset = u64::from(index).checked_mul(CYCLE_LENGTH_DAYS.unsigned_abs())?;
    let date = TREATMENT_ANCHOR_DATE.checked_add_days(Days::new(offset))?;
    let follow_up = POST_TREATMENT_OFFSETS.iter().copied().max().unwrap_or(0);
    date.checked_add_days(Days::new(follow_up.unsigned_abs()))?;
    Some(date)
}

const CLINIC_HOUR_MEAN: f64 = 13.0;
const CLINIC_HOUR_SD: f64 = 2.0;
const CLINIC_OPEN: f64 = 8.0;
const CLINIC_CLOSE: f64 = 17.0;
const TREATMENT_HOUR_SD: f64 = 1.5;
const EARLIEST_TREATMENT: f64 = 6.0;
const LATEST_TREATMENT: f64 = 20.0;

/// Hours after the sleep midpoint where efficacy peaks.
pub const OPTIMAL_PHASE_OFFSET: f64 = 5.0;
/// Hours after the sleep midpoint where toxicity peaks.
pub const VULNERABLE_PHASE_OFFSET: f64 = 2.0;

const EFFICACY_BASE: f64 = 0.5;
const EFFICACY_GAIN: f64 = 0.3;
const EFFICACY_WIDTH: f64 = 6.0;
const TOXICITY_BASE: f64 = 0.3;
const TOXICITY_GAIN: f64 = 0.4;
const TOXICITY_WIDTH: f64 = 4.0;
const SCORE_NOISE_SD: f64 = 0.1;
const SHRINKAGE_NOISE_SD: f64 = 10.0;

/// Noise-free efficacy for a dose at `treatment_hour`.
pub fn expected_efficacy(treatment_hour: HourOfDay, sleep_midpoint: HourOfDay) -> f64 {
    let optimal_time = (sleep_midpoint.value() + OPTIMAL_PHASE_OFFSET).rem_euclid(24.0);
    let time_offset = circular_distance(treatment_hour.value(), optimal_time);
    EFFICACY_BASE + phase_proximity(time_offset, EFFICACY_WIDTH) * EFFICACY_GAIN
}

/// Noise-free toxicity for a dose at `treatment_hour`.
pub fn expected_toxicity(treatment_hour: HourOfDay, sleep_midpoint: HourOfDay) -> f64 {
    let vulnerable_phase = (sleep_midpoint.value() + VULNERABLE_PHASE_OFFSET).rem_euclid(24.0);
    let toxicity_offset = circular_distance(treatment_hour.value(), vulnerable_phase);
    TOXICITY_BASE + phase_proximity(toxicity_offset, TOXICITY_WIDTH) * TOXICITY_GAIN
}

/// Synthesizes treatment episodes for one patient.
pub struct TreatmentGenerator {
    n_treatments: u32,
}

impl TreatmentGenerator {
    pub fn new(n_treatments: u32) -> Self {
        Self { n_treatments }
    }

    pub fn generate(
        &self,
        rng: &mut RandomStream,
        patient_id: &str,
        profile: &CircadianProfile,
    ) -> GenerateResult<Vec<TreatmentEpisode>> {
        (0..self.n_treatments)
            .map(|i| self.generate_episode(rng, patient_id, profile.sleep_midpoint, i))
            .collect()
    }

    /// Episode `index` (0-based) for a patient with the given phase.
    pub fn generate_episode(
        &self,
        rng: &mut RandomStream,
        patient_id: &str,
        sleep_midpoint: HourOfDay,
        index: u32,
    ) -> GenerateResult<TreatmentEpisode> {
        let date = cycle_date(index).ok_or_else(|| {
            GenerateError::DateOutOfRange(format!("treatment cycle {}", index + 1))
        })?;

        let clinic_hour = rng
            .normal(CLINIC_HOUR_MEAN, CLINIC_HOUR_SD)
            .clamp(CLINIC_OPEN, CLINIC_CLOSE);
        let treatment_hour = HourOfDay::new(
            rng.normal(clinic_hour, TREATMENT_HOUR_SD)
                .clamp(EARLIEST_TREATMENT, LATEST_TREATMENT),
        )?;

        let schedule = EpisodeSchedule {
            date,
            hour: treatment_hour,
            drug: rng.choose(&DrugClass::ALL),
            dose: DoseMultiplier::new(rng.uniform(DoseMultiplier::MIN, DoseMultiplier::MAX))?,
        };

        let efficacy = UnitScore::new(
            (expected_efficacy(treatment_hour, sleep_midpoint) + rng.normal(0.0, SCORE_NOISE_SD))
                .clamp(0.0, 1.0),
        )?;
        let toxicity = UnitScore::new(
            (expected_toxicity(treatment_hour, sleep_midpoint) + rng.normal(0.0, SCORE_NOISE_SD))
                .clamp(0.0, 1.0),
        )?;
        let tumor_shrinkage = Percentage::new(
            (efficacy.value() * 100.0 + rng.normal(0.0, SHRINKAGE_NOISE_SD)).clamp(0.0, 100.0),
        )?;

        Ok(TreatmentEpisode::new(
            patient_id,
            index + 1,
            schedule,
            EpisodeOutcome {
                efficacy,
                toxicity,
                tumor_shrinkage,
            },
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::{ToxicityGrade, RESPONSE_THRESHOLD};

    fn hour(h: f64) -> HourOfDay {
        HourOfDay::new(h).unwrap()
    }

    #[test]
    fn test_efficacy_uses_circular_distance() {
        // midpoint 0: optimal 05:00; 23:00 is 6h away, not 18h
        assert!((expected_efficacy(hour(23.0), hour(0.0)) - 0.5).abs() < 1e-12);
        assert!((expected_efficacy(hour(5.0), hour(0.0)) - 0.8).abs() < 1e-12);
        // midpoint 22: optimal 03:00; 01:00 is 2h away across midnight
        let expected = 0.5 + (1.0 - 2.0 / 6.0) * 0.3;
        assert!((expected_efficacy(hour(1.0), hour(22.0)) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_toxicity_window() {
        // midpoint 3: vulnerable 05:00
        assert!((expected_toxicity(hour(5.0), hour(3.0)) - 0.7).abs() < 1e-12);
        assert!((expected_toxicity(hour(7.0), hour(3.0)) - 0.5).abs() < 1e-12);
        assert!((expected_toxicity(hour(13.0), hour(3.0)) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_episode_schedule() {
        let generator = TreatmentGenerator::new(4);
        let mut rng = RandomStream::from_seed(42);
        for i in 0..4 {
            let episode = generator
                .generate_episode(&mut rng, "P0007", hour(3.0), i)
                .unwrap();
            assert_eq!(episode.cycle, i + 1);
            assert_eq!(episode.treatment_id, format!("P0007_T{}", i + 1));
            assert_eq!(
                episode.treatment_date,
                TREATMENT_ANCHOR_DATE + Duration::days(21 * i64::from(i))
            );
        }
    }

    /// Largest 0-based cycle index whose date and day +14 labs still fit the calendar.
    fn last_cycle_index() -> u32 {
        let days = (NaiveDate::MAX - TREATMENT_ANCHOR_DATE).num_days() - 14;
        u32::try_from(days / CYCLE_LENGTH_DAYS).unwrap()
    }

    #[test]
    fn test_cycle_date_calendar_boundary() {
        let last = last_cycle_index();
        let date = cycle_date(last).unwrap();
        assert!(date.checked_add_days(Days::new(14)).is_some());
        assert!(cycle_date(last + 1).is_none());
        assert!(cycle_date(u32::MAX).is_none());
    }

    #[test]
    fn test_episode_past_calendar_is_error() {
        let generator = TreatmentGenerator::new(u32::MAX);
        let mut rng = RandomStream::from_seed(42);

        let last = last_cycle_index();
        assert!(generator
            .generate_episode(&mut rng, "P0000", hour(3.0), last)
            .is_ok());
        let result = generator.generate_episode(&mut rng, "P0000", hour(3.0), last + 1);
        assert!(matches!(result, Err(GenerateError::DateOutOfRange(_))));
    }

    #[test]
    fn test_outcome_invariants_hold_for_many_draws() {
        let generator = TreatmentGenerator::new(1);
        let mut rng = RandomStream::from_seed(5);
        for n in 0..5000 {
            let midpoint = hour((n % 24) as f64 + 0.5);
            let episode = generator
                .generate_episode(&mut rng, "P0000", midpoint, 0)
                .unwrap();

            let h = episode.treatment_hour.value();
            assert!((6.0..=20.0).contains(&h));
            let dose = episode.dose.value();
            assert!((0.8..=1.2).contains(&dose));
            assert_eq!(
                episode.response,
                episode.efficacy_score.value() > RESPONSE_THRESHOLD
            );
            assert_eq!(
                episode.toxicity_grade,
                ToxicityGrade::from_score(episode.toxicity_score)
            );
            let shrinkage = episode.tumor_shrinkage_pct.value();
            assert!((0.0..=100.0).contains(&shrinkage));
        }
    }

    #[test]
    fn test_timing_matters_on_average() {
        // Patients whose optimal window falls in clinic hours respond more often
        let generator = TreatmentGenerator::new(1);
        let mut rng = RandomStream::from_seed(17);
        let mean_efficacy = |rng: &mut RandomStream, midpoint: f64| {
            (0..3000)
                .map(|_| {
                    generator
                        .generate_episode(rng, "P0000", hour(midpoint), 0)
                        .unwrap()
                        .efficacy_score
                        .value()
                })
                .sum::<f64>()
                / 3000.0
        };
        let aligned = mean_efficacy(&mut rng, 8.0);
        let misaligned = mean_efficacy(&mut rng, 20.0);
        assert!(aligned > misaligned + 0.1, "{} vs {}", aligned, misaligned);
    }
}
