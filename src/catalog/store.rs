//! In-memory catalog store
//!
//! Holds the assessment records and their unit-normalized embeddings,
//! positionally aligned. A `Catalog` is immutable once built; runtime reloads
//! go through [`SharedCatalog`], which swaps whole catalogs atomically.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::error::CatalogError;
use crate::core::types::{AssessmentRecord, EmbeddingVector};

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Immutable collection of assessment records and their embeddings
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<AssessmentRecord>,
    vectors: Vec<EmbeddingVector>,
    dimension: Option<usize>,
}

impl Catalog {
    /// Validate and build a catalog.
    ///
    /// Fails when the record and vector counts differ, a url repeats, a name
    /// is blank, or a vector is empty, non-finite, zero-norm, or of a
    /// different dimension than the first. Every vector is re-normalized.
    pub fn load(
        records: Vec<AssessmentRecord>,
        vectors: Vec<EmbeddingVector>,
    ) -> CatalogResult<Self> {
        if records.len() != vectors.len() {
            return Err(CatalogError::LengthMismatch {
                records: records.len(),
                vectors: vectors.len(),
            });
        }

        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if !seen.insert(record.url.as_str()) {
                return Err(CatalogError::DuplicateUrl {
                    url: record.url.clone(),
                    index,
                });
            }
        }

        let dimension = vectors.first().map(EmbeddingVector::dimension);
        let mut normalized = Vec::with_capacity(vectors.len());
        let mut already_unit = 0usize;

        for (index, vector) in vectors.iter().enumerate() {
            if vector.dimension() == 0 {
                return Err(CatalogError::EmptyVector { index });
            }
            if let Some(expected) = dimension {
                if vector.dimension() != expected {
                    return Err(CatalogError::DimensionMismatch {
                        index,
                        expected,
                        actual: vector.dimension(),
                    });
                }
            }
            if !vector.is_finite() {
                return Err(CatalogError::NonFinite { index });
            }
            if vector.is_unit() {
                already_unit += 1;
            }
            let unit = vector
                .normalized()
                .ok_or(CatalogError::ZeroNorm { index })?;
            normalized.push(unit);
        }

        debug!(
            "Normalized {} vectors ({} already unit length)",
            normalized.len(),
            already_unit
        );
        info!(
            "Catalog loaded: {} records, dimension {:?}",
            records.len(),
            dimension
        );

        Ok(Self {
            records,
            vectors: normalized,
            dimension,
        })
    }

    /// An empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of records
    pub fn size(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&AssessmentRecord> {
        self.records.get(index)
    }

    /// Unit embedding at `index`, if in range
    pub fn vector(&self, index: usize) -> Option<&EmbeddingVector> {
        self.vectors.get(index)
    }

    /// Embedding dimension, `None` for an empty catalog
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Iterate over `(index, record)` pairs in catalog order
    pub fn records(&self) -> impl Iterator<Item = (usize, &AssessmentRecord)> {
        self.records.iter().enumerate()
    }

    /// Index of the record with the given url
    pub fn position_of(&self, url: &str) -> Option<usize> {
        self.records.iter().position(|r| r.url == url)
    }

    /// Consume into aligned records and vectors
    pub fn into_parts(self) -> (Vec<AssessmentRecord>, Vec<EmbeddingVector>) {
        (self.records, self.vectors)
    }
}

/// A catalog shared between concurrent queries.
///
/// Readers take a cheap `Arc` snapshot and keep it for the whole query;
/// `publish` replaces the catalog only after the new one is fully built.
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    /// Share an already loaded catalog
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Snapshot of the currently published catalog
    pub fn current(&self) -> Arc<Catalog> {
        Arc::clone(&self.inner.read())
    }

    /// Atomically replace the published catalog; returns the previous one
    pub fn publish(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let previous = std::mem::replace(&mut *self.inner.write(), next);
        info!(
            "Published catalog with {} records (previous had {})",
            self.inner.read().size(),
            previous.size()
        );
        previous
    }
}

impl Default for SharedCatalog {
    fn default() -> Self {
        Self::new(Catalog::empty())
    }
}
