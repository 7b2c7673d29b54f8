//! Turns ranked indices into presentable recommendations

use super::ranker::RankedResult;
use crate::catalog::Catalog;
use crate::core::types::{Recommendation, TestTypeLabel};

/// Round a similarity score to 4 decimal places
pub fn round_score(score: f32) -> f64 {
    (score as f64 * 10_000.0).round() / 10_000.0
}

/// Maps ranked entries to [`Recommendation`]s, preserving order and count
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationAssembler;

impl RecommendationAssembler {
    pub fn new() -> Self {
        Self
    }

    pub fn assemble(&self, catalog: &Catalog, ranked: &RankedResult) -> Vec<Recommendation> {
        ranked
            .iter()
            .filter_map(|entry| {
                catalog.get(entry.index).map(|record| Recommendation {
                    name: record.name.clone(),
                    url: record.url.clone(),
                    duration_minutes: record.duration_minutes,
                    remote_testing: record.remote_testing,
                    adaptive_irt: record.adaptive_irt,
                    test_types: record.test_types.iter().map(TestTypeLabel::from).collect(),
                    score: round_score(entry.score),
                })
            })
            .collect()
    }
}
