//! OpenAI-compatible embedding provider
//!
//! Talks to any endpoint implementing `POST {base_url}/embeddings`.
//! Failures are surfaced immediately; retry policy belongs to the caller.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::EmbeddingConfig;
use super::error::{EmbeddingError, EmbeddingResult};
use super::EmbeddingProvider;
use crate::core::types::EmbeddingVector;

/// Embedding provider backed by an OpenAI-compatible HTTP API
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: Option<usize>,
    timeout_ms: u64,
}

impl OpenAiProvider {
    /// Build a provider from configuration
    pub fn new(config: &EmbeddingConfig) -> EmbeddingResult<Self> {
        if config.model.trim().is_empty() {
            return Err(EmbeddingError::ConfigError {
                reason: "missing embedding model name".to_string(),
            });
        }
        let api_key = config.resolve_api_key().ok_or_else(|| EmbeddingError::ConfigError {
            reason: "missing embedding API key".to_string(),
        })?;

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.expose_secret().trim());
        let mut auth = HeaderValue::from_str(&auth).map_err(|_| EmbeddingError::ConfigError {
            reason: "API key contains invalid header characters".to_string(),
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| EmbeddingError::ConfigError {
                reason: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            dimensions: config.dimensions,
            timeout_ms: config.timeout_ms,
        })
    }

    /// The full embeddings endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, inputs: &[&str]) -> EmbeddingResult<Vec<EmbeddingVector>> {
        let started = Instant::now();
        let body = EmbeddingRequest {
            model: &self.model,
            input: inputs,
            dimensions: self.dimensions,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            warn!("Embedding request failed with status {}", status);
            return Err(EmbeddingError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let mut parsed: EmbeddingResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::ResponseParseFailed {
                    reason: e.to_string(),
                })?;

        if parsed.data.len() != inputs.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: inputs.len(),
                actual: parsed.data.len(),
            });
        }
        parsed.data.sort_by_key(|entry| entry.index);

        let vectors: Vec<EmbeddingVector> = parsed
            .data
            .into_iter()
            .map(|entry| EmbeddingVector::new(entry.embedding))
            .collect();

        if let Some(expected) = self.dimensions {
            if let Some(bad) = vectors.iter().find(|v| v.dimension() != expected) {
                return Err(EmbeddingError::DimensionMismatch {
                    expected,
                    actual: bad.dimension(),
                });
            }
        }

        debug!(
            inputs = inputs.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Embedding request completed"
        );
        Ok(vectors)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> EmbeddingError {
        if err.is_timeout() {
            EmbeddingError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else if err.is_decode() {
            EmbeddingError::ResponseParseFailed {
                reason: err.to_string(),
            }
        } else {
            EmbeddingError::Unavailable {
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(&self, text: &str) -> EmbeddingResult<EmbeddingVector> {
        let mut vectors = self.request(&[text]).await?;
        vectors.pop().ok_or(EmbeddingError::CountMismatch {
            expected: 1,
            actual: 0,
        })
    }

    async fn embed_many(&self, texts: &[String]) -> EmbeddingResult<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        self.request(&inputs).await
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> Option<usize> {
        self.dimensions
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
