//! In-memory sink for dry runs and tests.

use tracing::info;

use super::{
    CohortSink, RunSummary, SinkReport, SinkResult, CIRCADIAN_ARTIFACT, DEMOGRAPHICS_ARTIFACT,
    LABS_ARTIFACT, SUMMARY_ARTIFACT, TREATMENTS_ARTIFACT,
};
use crate::models::Cohort;

/// Keeps the summary of every cohort written to it; stores nothing else.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    summaries: Vec<RunSummary>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    pub fn last(&self) -> Option<&RunSummary> {
        self.summaries.last()
    }
}

impl CohortSink for MemorySink {
    fn write_cohort(&mut self, cohort: &Cohort) -> SinkResult<SinkReport> {
        let summary = RunSummary::from_cohort(cohort)?;
        info!(root = %summary.digest.root, "Dry run, cohort not persisted");
        self.summaries.push(summary.clone());
        Ok(SinkReport {
            artifacts: [
                DEMOGRAPHICS_ARTIFACT,
                TREATMENTS_ARTIFACT,
                LABS_ARTIFACT,
                CIRCADIAN_ARTIFACT,
                SUMMARY_ARTIFACT,
            ]
            .iter()
            .map(|a| format!("memory:{}", a))
            .collect(),
            summary,
        })
    }
}
