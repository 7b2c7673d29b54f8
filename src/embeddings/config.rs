//! Configuration for the embedding provider

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Settings for an OpenAI-compatible embeddings endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// API base URL; `/embeddings` is appended
    pub base_url: String,

    /// Model name
    pub model: String,

    /// API key (never serialized)
    #[serde(skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Requested output dimension, if the model supports shortening
    pub dimensions: Option<usize>,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Maximum inputs per batch request (ingestion)
    pub batch_size: usize,

    /// Retry budget used by ingestion; the query path never retries
    pub max_retries: u32,

    /// Query embedding cache capacity (0 disables the cache)
    pub cache_capacity: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            api_key: None,
            dimensions: None,
            timeout_ms: 10_000,
            batch_size: 64,
            max_retries: 3,
            cache_capacity: 256,
        }
    }
}

impl EmbeddingConfig {
    /// Create a config with a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Create a config with a custom model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create a config with an API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Create a config with a custom timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The configured key, falling back to the `OPENAI_API_KEY` environment variable
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        self.api_key.clone().or_else(|| {
            std::env::var(API_KEY_ENV)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::new)
        })
    }
}
