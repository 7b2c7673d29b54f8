//! Core data types
//!
//! This module defines the fundamental data structures shared by the catalog,
//! the retrieval pipeline, and the front ends.

pub mod assessment;
pub mod embedding;
pub mod recommendation;

// Re-export commonly used types
pub use assessment::{AssessmentRecord, TestType, UNKNOWN_LABEL};
pub use embedding::{EmbeddingVector, UNIT_NORM_TOLERANCE};
pub use recommendation::{Recommendation, TestTypeLabel};
