//! Cohort aggregate.

use serde::{Deserialize, Serialize};

use super::{CircadianProfile, LabRecord, Patient, TreatmentEpisode};
use crate::config::CohortConfig;

/// Row counts of a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub n_patients: usize,
    pub n_treatments: usize,
    pub n_labs: usize,
}

/// A fully generated cohort. Read-only once assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    config: CohortConfig,
    demographics: Vec<Patient>,
    circadian_profiles: Vec<CircadianProfile>,
    treatments: Vec<TreatmentEpisode>,
    labs: Vec<LabRecord>,
}

impl Cohort {
    pub(crate) fn new(config: CohortConfig) -> Self {
        Self {
            config,
            demographics: Vec::new(),
            circadian_profiles: Vec::new(),
            treatments: Vec::new(),
            labs: Vec::new(),
        }
    }

    /// Append one patient's records. Only the assembler calls this.
    pub(crate) fn push_patient(
        &mut self,
        patient: Patient,
        profile: CircadianProfile,
        treatments: Vec<TreatmentEpisode>,
        labs: Vec<LabRecord>,
    ) {
        self.demographics.push(patient);
        self.circadian_profiles.push(profile);
        self.treatments.extend(treatments);
        self.labs.extend(labs);
    }

    /// Parameters the cohort was generated with.
    pub fn config(&self) -> &CohortConfig {
        &self.config
    }

    pub fn demographics(&self) -> &[Patient] {
        &self.demographics
    }

    pub fn circadian_profiles(&self) -> &[CircadianProfile] {
        &self.circadian_profiles
    }

    pub fn treatments(&self) -> &[TreatmentEpisode] {
        &self.treatments
    }

    pub fn labs(&self) -> &[LabRecord] {
        &self.labs
    }

    pub fn is_empty(&self) -> bool {
        self.demographics.is_empty()
    }

    pub fn summary(&self) -> CohortSummary {
        CohortSummary {
            n_patients: self.demographics.len(),
            n_treatments: self.treatments.len(),
            n_labs: self.labs.len(),
        }
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.demographics.iter().find(|p| p.patient_id == patient_id)
    }

    pub fn circadian_profile(&self, patient_id: &str) -> Option<&CircadianProfile> {
        self.circadian_profiles
            .iter()
            .find(|p| p.patient_id == patient_id)
    }

    pub fn treatments_for<'a>(
        &'a self,
        patient_id: &'a str,
    ) -> impl Iterator<Item = &'a TreatmentEpisode> + 'a {
        self.treatments
            .iter()
            .filter(move |t| t.patient_id == patient_id)
    }

    pub fn labs_for_treatment<'a>(
        &'a self,
        treatment_id: &'a str,
    ) -> impl Iterator<Item = &'a LabRecord> + 'a {
        self.labs
            .iter()
            .filter(move |l| l.treatment_id == treatment_id)
    }
}
