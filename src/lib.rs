//! Assessment recommender
//!
//! Recommends catalog assessments for a free-text hiring query:
//! - Constraint extraction (duration, category, remote) from the query
//! - Hard filtering of the catalog on those constraints
//! - Embedding similarity ranking of the survivors
//! - HTTP front end and offline catalog ingestion

pub mod catalog;
pub mod core;
pub mod embeddings;
pub mod logging;
pub mod search;
pub mod server;

// Re-export commonly used items
pub use catalog::{Catalog, CatalogError, CatalogSnapshot, SharedCatalog};
pub use core::config::AppConfig;
pub use core::context::AppContext;
pub use core::error::{RecommenderError, Result};
pub use core::types::{AssessmentRecord, EmbeddingVector, Recommendation, TestType};
pub use embeddings::{EmbeddingError, EmbeddingProvider};
pub use search::{RecommendOutcome, Recommender, SearchError};
