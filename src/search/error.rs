//! Error types for the retrieval pipeline

use thiserror::Error;

use crate::embeddings::EmbeddingError;

/// Result type for query-time operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors a recommendation query can fail with
#[derive(Error, Debug)]
pub enum SearchError {
    /// Query was empty or whitespace
    #[error("Query cannot be empty")]
    EmptyQuery,

    /// Query embedding has zero norm or non-finite components
    #[error("Query embedding is degenerate (zero norm or non-finite)")]
    DegenerateQuery,

    /// Provider failed, timed out, or returned the wrong dimension
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
}

impl SearchError {
    /// Check if retrying the same query could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Embedding(e) => e.is_retryable(),
            _ => false,
        }
    }
}
