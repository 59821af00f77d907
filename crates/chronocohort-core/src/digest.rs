//! Content fingerprint of a generated cohort.
//!
//! Each table is hashed row by row over its canonical JSON form; the root is
//! the hash of the four table hashes concatenated in a fixed order. Two
//! cohorts with the same root are byte-identical.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::Cohort;

/// SHA-256 fingerprints of a cohort, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortDigest {
    pub demographics: String,
    pub circadian_profiles: String,
    pub treatments: String,
    pub labs: String,
    pub root: String,
}

impl CohortDigest {
    pub fn compute(cohort: &Cohort) -> Result<Self, serde_json::Error> {
        let demographics = hash_rows(cohort.demographics())?;
        let circadian_profiles = hash_rows(cohort.circadian_profiles())?;
        let treatments = hash_rows(cohort.treatments())?;
        let labs = hash_rows(cohort.labs())?;

        let combined = format!("{}{}{}{}", demographics, circadian_profiles, treatments, labs);
        let root = hash_data(combined.as_bytes());

        Ok(Self {
            demographics,
            circadian_profiles,
            treatments,
            labs,
            root,
        })
    }
}

impl Cohort {
    /// Fingerprint of this cohort's contents.
    pub fn digest(&self) -> Result<CohortDigest, serde_json::Error> {
        CohortDigest::compute(self)
    }
}

/// Hash newline-separated canonical JSON rows.
fn hash_rows<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    for row in rows {
        hasher.update(serde_json::to_vec(row)?);
        hasher.update(b"\n");
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash data using SHA-256, hex encoded.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
