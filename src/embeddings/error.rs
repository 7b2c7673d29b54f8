//! Error types for embedding providers

use thiserror::Error;

/// Result type for embedding operations
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Errors that can occur while obtaining embeddings
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Provider could not be reached
    #[error("Embedding provider unavailable: {reason}")]
    Unavailable { reason: String },

    /// Provider answered with a non-success status
    #[error("Embedding request failed ({status}): {body}")]
    RequestFailed { status: u16, body: String },

    /// Request exceeded the configured timeout
    #[error("Embedding request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Vector dimension does not match the catalog or configuration
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Provider returned a different number of vectors than inputs
    #[error("Provider returned {actual} embeddings for {expected} inputs")]
    CountMismatch { expected: usize, actual: usize },

    /// Response body could not be decoded
    #[error("Embedding response parsing failed: {reason}")]
    ResponseParseFailed { reason: String },

    /// Provider is misconfigured
    #[error("Embedding configuration error: {reason}")]
    ConfigError { reason: String },

    /// Offline provider has no vector for this text
    #[error("No precomputed embedding for text: {text}")]
    UnknownText { text: String },
}

impl EmbeddingError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            EmbeddingError::Unavailable { .. } | EmbeddingError::Timeout { .. } => true,
            EmbeddingError::RequestFailed { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get suggested retry delay in milliseconds
    pub fn retry_delay_ms(&self) -> Option<u64> {
        match self {
            EmbeddingError::Unavailable { .. } => Some(1000),
            EmbeddingError::Timeout { .. } => Some(500),
            EmbeddingError::RequestFailed { status: 429, .. } => Some(2000),
            EmbeddingError::RequestFailed { status, .. } if *status >= 500 => Some(500),
            _ => None,
        }
    }
}
