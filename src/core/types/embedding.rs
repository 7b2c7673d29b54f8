//! Embedding vector type

use serde::{Deserialize, Serialize};

/// Tolerance within which a vector is considered already unit length
pub const UNIT_NORM_TOLERANCE: f32 = 1e-6;

/// A fixed-dimension embedding produced by an embedding provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    /// Wrap raw components
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Number of components
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Borrow the components
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Consume into the raw components
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Whether every component is finite
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }

    /// L2 norm
    pub fn norm(&self) -> f32 {
        self.norm_f64() as f32
    }

    /// Squares are accumulated in f64 so large or tiny f32 components
    /// neither overflow nor flush to zero.
    fn norm_f64(&self) -> f64 {
        self.0
            .iter()
            .map(|&x| f64::from(x) * f64::from(x))
            .sum::<f64>()
            .sqrt()
    }

    /// Whether the norm is within [`UNIT_NORM_TOLERANCE`] of 1.0
    pub fn is_unit(&self) -> bool {
        (self.norm() - 1.0).abs() <= UNIT_NORM_TOLERANCE
    }

    /// Scale to unit length.
    ///
    /// Returns `None` when the vector is empty, has a zero norm, or contains
    /// non-finite components.
    pub fn normalized(&self) -> Option<Self> {
        if self.0.is_empty() || !self.is_finite() {
            return None;
        }
        let norm = self.norm_f64();
        if norm == 0.0 || !norm.is_finite() {
            return None;
        }
        Some(Self(
            self.0.iter().map(|&x| (f64::from(x) / norm) as f32).collect(),
        ))
    }

    /// Dot product; equals cosine similarity when both vectors are unit length
    pub fn dot(&self, other: &EmbeddingVector) -> f32 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}
