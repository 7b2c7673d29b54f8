//! Recommendation output types
//!
//! These are what front ends receive; they carry no internal indices.

use serde::{Deserialize, Serialize};

use super::assessment::TestType;

/// A capability code paired with its human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestTypeLabel {
    /// Single-letter code
    pub code: String,
    /// Label, or "Unknown" for codes outside the alphabet
    pub label: String,
}

impl From<&TestType> for TestTypeLabel {
    fn from(t: &TestType) -> Self {
        Self {
            code: t.code().to_string(),
            label: t.label().to_string(),
        }
    }
}

/// One recommended assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub url: String,
    /// `null` when the catalog does not know the duration
    pub duration_minutes: Option<u32>,
    pub remote_testing: bool,
    pub adaptive_irt: bool,
    pub test_types: Vec<TestTypeLabel>,
    /// Cosine similarity rounded to 4 decimal places
    pub score: f64,
}
