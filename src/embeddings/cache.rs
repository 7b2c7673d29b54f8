//! LRU cache in front of an embedding provider

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use super::error::EmbeddingResult;
use super::EmbeddingProvider;
use crate::core::types::EmbeddingVector;

/// Caches single-text embeddings by exact text
pub struct CachedProvider {
    inner: Arc<dyn EmbeddingProvider>,
    cache: Mutex<LruCache<String, EmbeddingVector>>,
}

impl CachedProvider {
    /// Wrap `inner`; a zero capacity is bumped to one entry
    pub fn new(inner: Arc<dyn EmbeddingProvider>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

#[async_trait]
impl EmbeddingProvider for CachedProvider {
    async fn embed(&self, text: &str) -> EmbeddingResult<EmbeddingVector> {
        let cached = self.cache.lock().get(text).cloned();
        if let Some(hit) = cached {
            debug!("Embedding cache hit ({} chars)", text.len());
            return Ok(hit);
        }

        let vector = self.inner.embed(text).await?;
        self.cache.lock().put(text.to_string(), vector.clone());
        Ok(vector)
    }

    async fn embed_many(&self, texts: &[String]) -> EmbeddingResult<Vec<EmbeddingVector>> {
        self.inner.embed_many(texts).await
    }

    fn model(&self) -> &str {
        self.inner.model()
    }

    fn dimension(&self) -> Option<usize> {
        self.inner.dimension()
    }
}
