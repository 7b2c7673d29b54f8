//! Catalog error types

use thiserror::Error;

/// Errors raised while loading a catalog.
///
/// Every variant except `Io` and `Json` means the catalog itself is invalid.
/// These only occur at load time and are fatal to startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid catalog: {records} records but {vectors} vectors")]
    LengthMismatch { records: usize, vectors: usize },

    #[error("Invalid catalog: duplicate url {url} at index {index}")]
    DuplicateUrl { url: String, index: usize },

    #[error("Invalid catalog: record {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Invalid catalog: vector {index} is empty")]
    EmptyVector { index: usize },

    #[error("Invalid catalog: vector {index} has zero norm")]
    ZeroNorm { index: usize },

    #[error("Invalid catalog: vector {index} contains non-finite values")]
    NonFinite { index: usize },

    #[error("Invalid catalog: vector {index} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Snapshot declares dimension {declared} but vectors have dimension {actual}")]
    SnapshotDimension { declared: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether this error describes invalid catalog contents rather than a
    /// failure to read them
    pub fn is_invalid_catalog(&self) -> bool {
        !matches!(self, CatalogError::Io(_) | CatalogError::Json(_))
    }
}
