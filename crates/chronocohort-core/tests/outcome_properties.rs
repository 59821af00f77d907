//! Property tests for the response model and generated ranges.

use chronocohort_core::generator::{circular_distance, generate_cohort};
use chronocohort_core::models::{HourOfDay, ToxicityGrade, UnitScore, RESPONSE_THRESHOLD};
use chronocohort_core::CohortConfig;
use proptest::prelude::*;

/// Boundary cases for the toxicity grade step function.
struct GradeCase {
    toxicity: f64,
    expected: u8,
}

fn grade_cases() -> Vec<GradeCase> {
    vec![
        GradeCase { toxicity: 0.29, expected: 0 },
        GradeCase { toxicity: 0.30, expected: 1 },
        GradeCase { toxicity: 0.49, expected: 1 },
        GradeCase { toxicity: 0.50, expected: 2 },
        GradeCase { toxicity: 0.69, expected: 2 },
        GradeCase { toxicity: 0.70, expected: 3 },
        GradeCase { toxicity: 0.84, expected: 3 },
        GradeCase { toxicity: 0.85, expected: 4 },
    ]
}

#[test]
fn test_grade_boundaries() {
    for case in grade_cases() {
        let score = UnitScore::new(case.toxicity).unwrap();
        assert_eq!(
            ToxicityGrade::from_score(score).as_u8(),
            case.expected,
            "toxicity {}",
            case.toxicity
        );
    }
}

#[test]
fn test_response_at_threshold_is_zero() {
    assert_eq!(RESPONSE_THRESHOLD, 0.6);
    let score = UnitScore::new(0.6).unwrap();
    assert!(!chronocohort_core::models::is_response(score));
}

#[test]
fn test_circular_distance_across_midnight() {
    let sleep_midpoint = 0.0;
    let optimal_time = (sleep_midpoint + 5.0) % 24.0;
    assert_eq!(optimal_time, 5.0);
    assert_eq!(circular_distance(23.0, optimal_time), 6.0);
    assert_ne!(circular_distance(23.0, optimal_time), 18.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_generated_values_in_range(seed in any::<u64>()) {
        let cohort = generate_cohort(CohortConfig {
            n_patients: 3,
            n_treatments: 3,
            n_days_circadian: 2,
            seed,
        }).unwrap();

        for profile in cohort.circadian_profiles() {
            let mid = profile.sleep_midpoint.value();
            prop_assert!((0.0..24.0).contains(&mid));
            let dur = profile.sleep_duration.hours();
            prop_assert!((5.0..=10.0).contains(&dur));
            prop_assert!(profile.actigraphy.iter().all(|s| s.activity >= 0.0));
        }

        for episode in cohort.treatments() {
            let e = episode.efficacy_score.value();
            let t = episode.toxicity_score.value();
            prop_assert!((0.0..=1.0).contains(&e));
            prop_assert!((0.0..=1.0).contains(&t));
            prop_assert!((0.0..=100.0).contains(&episode.tumor_shrinkage_pct.value()));
            prop_assert_eq!(episode.response, e > 0.6);
            prop_assert_eq!(episode.toxicity_grade, ToxicityGrade::from_score(episode.toxicity_score));
            prop_assert!(episode.validate().is_ok());
        }

        for patient in cohort.demographics() {
            prop_assert!((25..=85).contains(&patient.age));
        }
    }

    #[test]
    fn prop_grade_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let g_lo = ToxicityGrade::from_score(UnitScore::new(lo).unwrap());
        let g_hi = ToxicityGrade::from_score(UnitScore::new(hi).unwrap());
        prop_assert!(g_lo <= g_hi);
    }

    #[test]
    fn prop_circular_distance_symmetric_and_bounded(a in 0.0f64..24.0, b in 0.0f64..24.0) {
        let d = circular_distance(a, b);
        prop_assert!((0.0..=12.0).contains(&d));
        prop_assert!((d - circular_distance(b, a)).abs() < 1e-9);
        let linear = (a - b).abs();
        prop_assert!((d - linear.min(24.0 - linear)).abs() < 1e-9);
    }

    #[test]
    fn prop_wrapped_hours_on_circle(h in -1000.0f64..1000.0) {
        let wrapped = HourOfDay::wrapping(h).unwrap().value();
        prop_assert!((0.0..24.0).contains(&wrapped));
    }
}
