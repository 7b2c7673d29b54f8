//! Similarity ranking of filtered candidates
//!
//! The query is embedded once, normalized, and scored against each candidate's
//! stored unit vector. Scoring sits behind [`SimilarityIndex`] so the exact
//! scan can be replaced by an approximate index with the same contract.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{SearchError, SearchResult};
use super::filter::CandidateSet;
use crate::catalog::Catalog;
use crate::core::types::EmbeddingVector;
use crate::embeddings::{EmbeddingError, EmbeddingProvider};

/// Number of results returned when the caller does not ask for a size
pub const DEFAULT_TOP_K: usize = 10;

/// A scored catalog index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub index: usize,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

/// Score descending, then index ascending
pub fn rank_order(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.index.cmp(&b.index))
}

/// Ranked entries in [`rank_order`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResult {
    entries: Vec<RankedEntry>,
}

impl RankedResult {
    pub fn new(entries: Vec<RankedEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }
}

/// Top-k scoring over a catalog's stored vectors
pub trait SimilarityIndex: Send + Sync {
    /// Score `candidates` against a unit `query` and return the best `top_k`
    /// in [`rank_order`].
    fn top_k(
        &self,
        catalog: &Catalog,
        candidates: &CandidateSet,
        query: &EmbeddingVector,
        top_k: usize,
    ) -> Vec<RankedEntry>;
}

/// Exact linear scan with partial selection
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactScan;

impl SimilarityIndex for ExactScan {
    fn top_k(
        &self,
        catalog: &Catalog,
        candidates: &CandidateSet,
        query: &EmbeddingVector,
        top_k: usize,
    ) -> Vec<RankedEntry> {
        if top_k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<RankedEntry> = candidates
            .iter()
            .filter_map(|index| {
                catalog.vector(index).map(|v| RankedEntry {
                    index,
                    score: v.dot(query),
                })
            })
            .collect();

        if scored.len() > top_k {
            scored.select_nth_unstable_by(top_k - 1, rank_order);
            scored.truncate(top_k);
        }
        scored.sort_by(rank_order);
        scored
    }
}

/// Ranker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Results per query when the caller gives no size
    pub top_k: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

/// Embeds the query and scores candidates through a [`SimilarityIndex`]
pub struct SimilarityRanker {
    provider: Arc<dyn EmbeddingProvider>,
    index: Box<dyn SimilarityIndex>,
}

impl SimilarityRanker {
    /// Ranker using an exact scan
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_index(provider, Box::new(ExactScan))
    }

    pub fn with_index(provider: Arc<dyn EmbeddingProvider>, index: Box<dyn SimilarityIndex>) -> Self {
        Self { provider, index }
    }

    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// Rank `candidates` by similarity to `query`.
    ///
    /// An empty candidate set or a `top_k` of zero returns an empty result
    /// without calling the provider. Fewer candidates than `top_k` is not an
    /// error.
    pub async fn rank(
        &self,
        catalog: &Catalog,
        candidates: &CandidateSet,
        query: &str,
        top_k: usize,
    ) -> SearchResult<RankedResult> {
        if candidates.is_empty() || top_k == 0 {
            return Ok(RankedResult::default());
        }

        let raw = self.provider.embed(query).await.map_err(|e| {
            warn!("Query embedding failed: {}", e);
            SearchError::from(e)
        })?;

        if let Some(expected) = catalog.dimension() {
            if raw.dimension() != expected {
                warn!(
                    "Query embedding dimension {} does not match catalog dimension {}",
                    raw.dimension(),
                    expected
                );
                return Err(EmbeddingError::DimensionMismatch {
                    expected,
                    actual: raw.dimension(),
                }
                .into());
            }
        }

        let query_vector = raw.normalized().ok_or(SearchError::DegenerateQuery)?;
        let entries = self.index.top_k(catalog, candidates, &query_vector, top_k);
        debug!(
            "Ranked {} candidates, kept {}",
            candidates.len(),
            entries.len()
        );
        Ok(RankedResult::new(entries))
    }
}
