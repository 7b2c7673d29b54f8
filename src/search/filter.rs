//! Hard-constraint filtering over the catalog

use tracing::debug;

use super::constraints::ConstraintSet;
use crate::catalog::Catalog;

/// Catalog indices that survived filtering, in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet(Vec<usize>);

impl CandidateSet {
    /// Every index of a catalog of `size` records
    pub fn all(size: usize) -> Self {
        Self((0..size).collect())
    }

    /// Build from arbitrary indices; sorted and deduplicated
    pub fn from_indices(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self(indices)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Keeps the records that satisfy a [`ConstraintSet`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateFilter;

impl CandidateFilter {
    pub fn new() -> Self {
        Self
    }

    /// Indices of records admitted by `constraints`. Never fails.
    pub fn filter(&self, catalog: &Catalog, constraints: &ConstraintSet) -> CandidateSet {
        let indices: Vec<usize> = catalog
            .records()
            .filter(|(_, record)| constraints.admits(record))
            .map(|(index, _)| index)
            .collect();
        debug!(
            "Filtered catalog: {} of {} records admitted",
            indices.len(),
            catalog.size()
        );
        CandidateSet(indices)
    }
}
