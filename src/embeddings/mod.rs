//! Embedding providers
//!
//! Turns text into vectors for catalog ingestion and query ranking.
//! Providers:
//! - [`OpenAiProvider`] for OpenAI-compatible HTTP endpoints
//! - [`PrecomputedProvider`] for offline lookups (tests, replay)
//! - [`CachedProvider`] wrapping any provider with an LRU of query vectors

mod cache;
mod config;
mod error;
mod openai;
mod precomputed;

#[cfg(test)]
mod tests;

pub use cache::CachedProvider;
pub use config::{EmbeddingConfig, API_KEY_ENV};
pub use error::{EmbeddingError, EmbeddingResult};
pub use openai::OpenAiProvider;
pub use precomputed::PrecomputedProvider;

use async_trait::async_trait;

use crate::core::types::EmbeddingVector;

/// Anything that can map text to an embedding vector
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> EmbeddingResult<EmbeddingVector>;

    /// Embed several texts, preserving input order
    async fn embed_many(&self, texts: &[String]) -> EmbeddingResult<Vec<EmbeddingVector>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Model identifier recorded in snapshots
    fn model(&self) -> &str;

    /// Output dimension, when known up front
    fn dimension(&self) -> Option<usize>;
}
