//! Application-level error types
//!
//! Each module owns its own error enum; [`RecommenderError`] unifies them at
//! the application boundary and [`ErrorRecovery`] tells callers what to do
//! about a failure.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::embeddings::EmbeddingError;
use crate::logging::LoggingError;
use crate::search::SearchError;

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, RecommenderError>;

/// Main error type for the recommender
#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Server error: {reason}")]
    Server { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config load failed: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid config value: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// Base delay when an error suggests none
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Upper bound on any backoff delay
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;

/// Trait for error recovery strategies
pub trait ErrorRecovery {
    /// Check if the error is retryable
    fn is_retryable(&self) -> bool;

    /// Get suggested retry delay in milliseconds
    fn retry_delay_ms(&self) -> Option<u64>;

    /// Get recovery action suggestion
    fn recovery_action(&self) -> RecoveryAction;

    /// Exponential backoff for the zero-based `attempt`, capped at
    /// [`MAX_RETRY_DELAY_MS`]
    fn backoff_delay_ms(&self, attempt: u32) -> u64 {
        let base = self.retry_delay_ms().unwrap_or(DEFAULT_RETRY_DELAY_MS);
        2u64.checked_pow(attempt)
            .and_then(|factor| base.checked_mul(factor))
            .map_or(MAX_RETRY_DELAY_MS, |delay| delay.min(MAX_RETRY_DELAY_MS))
    }
}

/// Recovery action suggestions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Retry the operation
    Retry,
    /// Skip this item and continue
    Skip,
    /// Report to the caller; the input must change
    NotifyUser,
    /// Abort the operation
    Abort,
}

impl ErrorRecovery for RecommenderError {
    fn is_retryable(&self) -> bool {
        match self {
            RecommenderError::Search(e) => e.is_retryable(),
            RecommenderError::Embedding(e) => e.is_retryable(),
            RecommenderError::Io(_) => true,
            _ => false,
        }
    }

    fn retry_delay_ms(&self) -> Option<u64> {
        match self {
            RecommenderError::Search(SearchError::Embedding(e)) => e.retry_delay_ms(),
            RecommenderError::Embedding(e) => e.retry_delay_ms(),
            RecommenderError::Io(_) => Some(1000),
            _ => None,
        }
    }

    fn recovery_action(&self) -> RecoveryAction {
        match self {
            RecommenderError::Search(SearchError::EmptyQuery) => RecoveryAction::NotifyUser,
            RecommenderError::Search(SearchError::DegenerateQuery) => RecoveryAction::Skip,
            RecommenderError::Search(SearchError::Embedding(e)) | RecommenderError::Embedding(e) => {
                if e.is_retryable() {
                    RecoveryAction::Retry
                } else {
                    RecoveryAction::Abort
                }
            }
            RecommenderError::Catalog(_) | RecommenderError::Config(_) => RecoveryAction::Abort,
            RecommenderError::Io(_) => RecoveryAction::Retry,
            RecommenderError::Logging(_) | RecommenderError::Server { .. } => RecoveryAction::Abort,
        }
    }
}
