//! Domain models for synthetic chronotherapy cohorts.

mod circadian;
mod cohort;
mod lab;
mod measures;
mod patient;
mod treatment;

pub use circadian::*;
pub use cohort::*;
pub use lab::*;
pub use measures::*;
pub use patient::*;
pub use treatment::*;

use thiserror::Error;

/// Record validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} out of range: {value} not in {range}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type ValidationResult<T> = Result<T, ValidationError>;
