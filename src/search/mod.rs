//! Retrieval pipeline for assessment recommendations
//!
//! A query flows through four stages:
//! - [`ConstraintExtractor`] pulls duration, category, and remote hints out of text
//! - [`CandidateFilter`] drops records that violate those hints
//! - [`SimilarityRanker`] embeds the query and scores the survivors
//! - [`RecommendationAssembler`] shapes the result for callers
//!
//! [`Recommender`] wires them together.

mod assembler;
mod constraints;
mod error;
mod filter;
mod pipeline;
mod ranker;


pub use assembler::{round_score, RecommendationAssembler};
pub use constraints::{ConstraintExtractor, ConstraintRule, ConstraintSet, RuleEffect};
pub use error::{SearchError, SearchResult};
pub use filter::{CandidateFilter, CandidateSet};
pub use pipeline::{RecommendOutcome, Recommender};
pub use ranker::{
    rank_order, ExactScan, RankedEntry, RankedResult, RankerConfig, SimilarityIndex,
    SimilarityRanker, DEFAULT_TOP_K,
};
