//! Laboratory trajectories around each treatment.

use crate::models::{LabPanel, LabPhase, LabRecord, TreatmentEpisode};
use crate::random::RandomStream;

const WBC_FLOOR: f64 = 2.0;
const HEMOGLOBIN_FLOOR: f64 = 8.0;
const PLATELET_FLOOR: f64 = 50.0;

/// Emits three pre-treatment and three post-treatment panels per episode.
///
/// Pre-treatment panels are baseline draws. Post-treatment blood counts drop
/// and transaminase rises in proportion to the episode's toxicity score.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabGenerator;

impl LabGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Six records per episode, pre panels first, episodes in input order.
    pub fn generate(&self, rng: &mut RandomStream, episodes: &[TreatmentEpisode]) -> Vec<LabRecord> {
        let mut labs = Vec::with_capacity(episodes.len() * 6);
        for episode in episodes {
            for offset in LabPhase::Pre.offsets() {
                let panel = baseline_panel(rng);
                labs.push(LabRecord::for_episode(episode, LabPhase::Pre, offset, panel));
            }
            let toxicity = episode.toxicity_score.value();
            for offset in LabPhase::Post.offsets() {
                let panel = post_treatment_panel(rng, toxicity);
                labs.push(LabRecord::for_episode(episode, LabPhase::Post, offset, panel));
            }
        }
        labs
    }
}

fn baseline_panel(rng: &mut RandomStream) -> LabPanel {
    LabPanel {
        wbc: rng.normal(6.0, 2.0),
        hemoglobin: rng.normal(12.0, 2.0),
        platelets: rng.normal(250.0, 80.0),
        creatinine: rng.normal(1.0, 0.3),
        alt: rng.normal(30.0, 15.0),
    }
}

fn post_treatment_panel(rng: &mut RandomStream, toxicity: f64) -> LabPanel {
    LabPanel {
        wbc: rng.normal(6.0 - 3.0 * toxicity, 1.5).max(WBC_FLOOR),
        hemoglobin: rng.normal(12.0 - 2.0 * toxicity, 1.5).max(HEMOGLOBIN_FLOOR),
        platelets: rng.normal(250.0 - 100.0 * toxicity, 50.0).max(PLATELET_FLOOR),
        creatinine: rng.normal(1.0, 0.3),
        alt: rng.normal(30.0 + 10.0 * toxicity, 15.0),
    }
}
