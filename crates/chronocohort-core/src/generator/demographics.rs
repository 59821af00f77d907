//! Static patient attributes.

use super::GenerateResult;
use crate::models::{CancerType, Patient, Sex, Stage};
use crate::random::{RandomStream, WeightedChoices};

const AGE_MEAN: f64 = 60.0;
const AGE_SD: f64 = 15.0;
const BMI_MEAN: f64 = 25.0;
const BMI_SD: f64 = 5.0;

const ECOG_WEIGHTS: [(u8, f64); 3] = [(0, 0.4), (1, 0.4), (2, 0.2)];
const COMORBIDITY_WEIGHTS: [(u8, f64); 3] = [(0, 0.5), (1, 0.3), (2, 0.2)];

/// Draws one demographic row per patient.
pub struct DemographicsGenerator {
    ecog: WeightedChoices<u8>,
    comorbidities: WeightedChoices<u8>,
}

impl DemographicsGenerator {
    pub fn new() -> GenerateResult<Self> {
        Ok(Self {
            ecog: WeightedChoices::new(&ECOG_WEIGHTS)?,
            comorbidities: WeightedChoices::new(&COMORBIDITY_WEIGHTS)?,
        })
    }

    /// Generate `n_patients` rows in index order.
    pub fn generate(&self, rng: &mut RandomStream, n_patients: usize) -> GenerateResult<Vec<Patient>> {
        (0..n_patients)
            .map(|index| self.generate_patient(rng, index))
            .collect()
    }

    /// Draw the attributes of the patient at `index`.
    pub fn generate_patient(&self, rng: &mut RandomStream, index: usize) -> GenerateResult<Patient> {
        let age = rng
            .normal(AGE_MEAN, AGE_SD)
            .clamp(f64::from(Patient::MIN_AGE), f64::from(Patient::MAX_AGE))
            .trunc() as u8;
        let sex = rng.choose(&Sex::ALL);
        let ecog_score = rng.choose_weighted(&self.ecog);
        let bmi = rng.normal(BMI_MEAN, BMI_SD);
        let cancer_type = rng.choose(&CancerType::ALL);
        let stage = rng.choose(&Stage::ALL);
        let comorbidities = rng.choose_weighted(&self.comorbidities);

        Ok(Patient::new(
            Patient::format_id(index),
            age,
            sex,
            ecog_score,
            bmi,
            cancer_type,
            stage,
            comorbidities,
        )?)
    }
}
