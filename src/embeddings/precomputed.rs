//! Offline provider serving vectors from a lookup table

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::{EmbeddingError, EmbeddingResult};
use super::EmbeddingProvider;
use crate::core::types::EmbeddingVector;

/// Serves embeddings from an in-memory `text -> vector` table
#[derive(Debug, Clone, Default)]
pub struct PrecomputedProvider {
    model: String,
    vectors: HashMap<String, EmbeddingVector>,
    dimension: Option<usize>,
}

impl PrecomputedProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            vectors: HashMap::new(),
            dimension: None,
        }
    }

    /// Add a text and its vector
    pub fn with_vector(mut self, text: impl Into<String>, vector: impl Into<EmbeddingVector>) -> Self {
        self.insert(text, vector);
        self
    }

    pub fn insert(&mut self, text: impl Into<String>, vector: impl Into<EmbeddingVector>) {
        let vector = vector.into();
        if self.dimension.is_none() {
            self.dimension = Some(vector.dimension());
        }
        self.vectors.insert(text.into(), vector);
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[async_trait]
impl EmbeddingProvider for PrecomputedProvider {
    async fn embed(&self, text: &str) -> EmbeddingResult<EmbeddingVector> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::UnknownText {
                text: text.to_string(),
            })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
