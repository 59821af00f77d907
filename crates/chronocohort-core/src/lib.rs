//! Chronocohort Core Library
//!
//! Synthetic cancer-patient cohorts for chronotherapy-timing research.
//!
//! # Architecture
//!
//! ```text
//!                    RandomStream (seeded, passed explicitly)
//!                                  │
//!   Demographics ──► per patient: CircadianProfile ──► TreatmentEpisodes ──► LabRecords
//!                                                                                │
//!                                                                        Cohort Assembler
//!                                                                                │
//!                                     ┌──────────────────────┬───────────────────┴──────┐
//!                                     ▼                      ▼                          ▼
//!                               DirectorySink            SqliteSink                MemorySink
//!                            (CSV + JSON files)         (single .db)              (dry runs)
//! ```
//!
//! # Core Principle
//!
//! **Same seed, same parameters, same bytes.** Every draw comes from one
//! [`RandomStream`] in a fixed order, and [`CohortDigest`] fingerprints the
//! result so reproductions can be checked.
//!
//! # Modules
//!
//! - [`random`]: seeded random stream and weighted choices
//! - [`models`]: domain types (Patient, CircadianProfile, TreatmentEpisode, LabRecord, Cohort)
//! - [`generator`]: demographics, circadian, treatment and lab generators plus the assembler
//! - [`digest`]: SHA-256 fingerprint of a generated cohort
//! - [`sink`]: persistence of a finished cohort
//! - [`config`]: generation parameters and validation

pub mod config;
pub mod digest;
pub mod generator;
pub mod models;
pub mod random;
pub mod sink;

// Re-export commonly used types
pub use config::{CohortConfig, ConfigError};
pub use digest::CohortDigest;
pub use generator::{circular_distance, generate_cohort, CohortGenerator, GenerateError};
pub use models::{
    ActigraphySample, CancerType, CircadianProfile, Cohort, CohortSummary, DrugClass, LabPhase,
    LabRecord, Patient, Sex, SleepWindow, Stage, ToxicityGrade, TreatmentEpisode,
    ValidationError,
};
pub use random::{RandomStream, WeightedChoices};
pub use sink::{CohortSink, DirectorySink, MemorySink, RunSummary, SinkError, SqliteSink};
