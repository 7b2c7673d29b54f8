//! End-to-end recommendation: extract, filter, rank, assemble

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::assembler::RecommendationAssembler;
use super::constraints::{ConstraintExtractor, ConstraintSet};
use super::error::{SearchError, SearchResult};
use super::filter::CandidateFilter;
use super::ranker::{RankerConfig, SimilarityRanker};
use crate::catalog::SharedCatalog;
use crate::core::types::Recommendation;
use crate::embeddings::EmbeddingProvider;

/// Result of a recommendation query
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendOutcome {
    /// Best matches, best first (empty when `top_k` is 0)
    Ranked(Vec<Recommendation>),
    /// No record satisfied the extracted constraints
    NoCandidates { constraints: ConstraintSet },
}

impl RecommendOutcome {
    /// Recommendations, empty when nothing matched
    pub fn into_recommendations(self) -> Vec<Recommendation> {
        match self {
            RecommendOutcome::Ranked(recs) => recs,
            RecommendOutcome::NoCandidates { .. } => Vec::new(),
        }
    }

    pub fn is_no_candidates(&self) -> bool {
        matches!(self, RecommendOutcome::NoCandidates { .. })
    }
}

/// Query entry point combining every pipeline stage
pub struct Recommender {
    catalog: SharedCatalog,
    extractor: ConstraintExtractor,
    filter: CandidateFilter,
    ranker: SimilarityRanker,
    assembler: RecommendationAssembler,
    config: RankerConfig,
}

impl Recommender {
    pub fn new(catalog: SharedCatalog, provider: Arc<dyn EmbeddingProvider>, config: RankerConfig) -> Self {
        Self {
            catalog,
            extractor: ConstraintExtractor::default(),
            filter: CandidateFilter::new(),
            ranker: SimilarityRanker::new(provider),
            assembler: RecommendationAssembler::new(),
            config,
        }
    }

    /// Replace the constraint rule table
    pub fn with_extractor(mut self, extractor: ConstraintExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the ranker (e.g. to use another similarity index)
    pub fn with_ranker(mut self, ranker: SimilarityRanker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn default_top_k(&self) -> usize {
        self.config.top_k
    }

    /// Recommend assessments for a free-text query.
    ///
    /// `top_k` defaults to the configured size. The catalog snapshot is taken
    /// once, so a concurrent reload does not affect a running query.
    pub async fn recommend(&self, query: &str, top_k: Option<usize>) -> SearchResult<RecommendOutcome> {
        let started = Instant::now();
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let top_k = top_k.unwrap_or(self.config.top_k);
        let catalog = self.catalog.current();

        let constraints = self.extractor.extract(query);
        debug!("Extracted constraints: {:?}", constraints);

        let candidates = self.filter.filter(&catalog, &constraints);
        if candidates.is_empty() {
            info!(
                duration_ms = started.elapsed().as_millis() as u64,
                "No candidates for query"
            );
            return Ok(RecommendOutcome::NoCandidates { constraints });
        }

        let ranked = self.ranker.rank(&catalog, &candidates, query, top_k).await?;
        let recommendations = self.assembler.assemble(&catalog, &ranked);

        info!(
            candidates = candidates.len(),
            returned = recommendations.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Recommendation completed"
        );
        Ok(RecommendOutcome::Ranked(recommendations))
    }
}
