//! Tests for the embedding providers

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::core::types::EmbeddingVector;

/// Provider that counts calls and returns a vector derived from text length
struct CountingProvider {
    calls: AtomicUsize,
}

impl CountingProvider {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for CountingProvider {
    async fn embed(&self, text: &str) -> EmbeddingResult<EmbeddingVector> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(EmbeddingVector::new(vec![text.len() as f32, 1.0]))
    }

    fn model(&self) -> &str {
        "counting"
    }

    fn dimension(&self) -> Option<usize> {
        Some(2)
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.model, "text-embedding-3-small");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.batch_size, 64);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = EmbeddingConfig::default().with_api_key("sk-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(config.resolve_api_key().is_some());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EmbeddingConfig =
            serde_json::from_str(r#"{"model": "custom", "api_key": "k"}"#).unwrap();
        assert_eq!(config.model, "custom");
        assert_eq!(config.timeout_ms, 10_000);
        assert!(config.api_key.is_some());
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        assert!(EmbeddingError::Unavailable {
            reason: "refused".to_string()
        }
        .is_retryable());
        assert!(EmbeddingError::Timeout { timeout_ms: 100 }.is_retryable());
        assert!(EmbeddingError::RequestFailed {
            status: 429,
            body: String::new()
        }
        .is_retryable());
        assert!(EmbeddingError::RequestFailed {
            status: 503,
            body: String::new()
        }
        .is_retryable());

        assert!(!EmbeddingError::RequestFailed {
            status: 401,
            body: String::new()
        }
        .is_retryable());
        assert!(!EmbeddingError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
        .is_retryable());
    }

    #[test]
    fn test_retry_delay() {
        assert_eq!(
            EmbeddingError::RequestFailed {
                status: 429,
                body: String::new()
            }
            .retry_delay_ms(),
            Some(2000)
        );
        assert_eq!(
            EmbeddingError::ConfigError {
                reason: "x".to_string()
            }
            .retry_delay_ms(),
            None
        );
    }
}

#[cfg(test)]
mod precomputed_tests {
    use super::*;

    #[tokio::test]
    async fn test_known_and_unknown_text() {
        let provider = PrecomputedProvider::new("fixed")
            .with_vector("java developer", vec![1.0, 0.0])
            .with_vector("sales manager", vec![0.0, 1.0]);

        assert_eq!(provider.len(), 2);
        assert_eq!(provider.dimension(), Some(2));
        assert_eq!(provider.model(), "fixed");

        let v = provider.embed("java developer").await.unwrap();
        assert_eq!(v.as_slice(), &[1.0, 0.0]);

        let err = provider.embed("nobody").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::UnknownText { .. }));
    }

    #[tokio::test]
    async fn test_embed_many_preserves_order() {
        let provider = PrecomputedProvider::new("fixed")
            .with_vector("a", vec![1.0])
            .with_vector("b", vec![2.0]);

        let vectors = provider
            .embed_many(&["b".to_string(), "a".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors[0].as_slice(), &[2.0]);
        assert_eq!(vectors[1].as_slice(), &[1.0]);
    }
}

#[cfg(test)]
mod cache_tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_hit_skips_inner_provider() {
        let inner = Arc::new(CountingProvider::new());
        let cached = CachedProvider::new(inner.clone(), 4);

        let first = cached.embed("query").await.unwrap();
        let second = cached.embed("query").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_evicts_least_recently_used() {
        let inner = Arc::new(CountingProvider::new());
        let cached = CachedProvider::new(inner.clone(), 2);

        cached.embed("a").await.unwrap();
        cached.embed("b").await.unwrap();
        cached.embed("c").await.unwrap();
        assert_eq!(cached.len(), 2);

        // "a" was evicted
        cached.embed("a").await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_cache_delegates_metadata() {
        let cached = CachedProvider::new(Arc::new(CountingProvider::new()), 0);
        assert_eq!(cached.model(), "counting");
        assert_eq!(cached.dimension(), Some(2));
        cached.clear();
        assert!(cached.is_empty());
    }
}

#[cfg(test)]
mod openai_tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_mock(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn config_for(base_url: String) -> EmbeddingConfig {
        EmbeddingConfig::default()
            .with_base_url(base_url)
            .with_api_key("test-key")
            .with_timeout_ms(2_000)
    }

    async fn echo_embeddings(Json(body): Json<Value>) -> Json<Value> {
        let inputs = body["input"].as_array().cloned().unwrap_or_default();
        // Return entries in reverse order to exercise index sorting
        let data: Vec<Value> = inputs
            .iter()
            .enumerate()
            .rev()
            .map(|(i, text)| {
                let len = text.as_str().unwrap_or_default().len() as f32;
                json!({ "object": "embedding", "index": i, "embedding": [len, 1.0] })
            })
            .collect();
        Json(json!({ "object": "list", "data": data, "model": body["model"] }))
    }

    #[tokio::test]
    async fn test_embed_many_sorts_by_index() {
        let app = Router::new().route("/v1/embeddings", post(echo_embeddings));
        let base_url = spawn_mock(app).await;
        let provider = OpenAiProvider::new(&config_for(base_url)).unwrap();

        let vectors = provider
            .embed_many(&["a".to_string(), "abc".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0].as_slice(), &[1.0, 1.0]);
        assert_eq!(vectors[1].as_slice(), &[3.0, 1.0]);

        let single = provider.embed("ab").await.unwrap();
        assert_eq!(single.as_slice(), &[2.0, 1.0]);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_request_failed() {
        let app = Router::new().route(
            "/v1/embeddings",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = spawn_mock(app).await;
        let provider = OpenAiProvider::new(&config_for(base_url)).unwrap();

        let err = provider.embed("query").await.unwrap_err();
        match err {
            EmbeddingError::RequestFailed { status, ref body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("Expected RequestFailed, got {:?}", other),
        }
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_count_mismatch_is_reported() {
        let app = Router::new().route(
            "/v1/embeddings",
            post(|| async { Json(json!({ "data": [] })) }),
        );
        let base_url = spawn_mock(app).await;
        let provider = OpenAiProvider::new(&config_for(base_url)).unwrap();

        let err = provider.embed("query").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::CountMismatch {
                expected: 1,
                actual: 0
            }
        ));
    }

    #[tokio::test]
    async fn test_configured_dimension_is_enforced() {
        let app = Router::new().route("/v1/embeddings", post(echo_embeddings));
        let base_url = spawn_mock(app).await;
        let mut config = config_for(base_url);
        config.dimensions = Some(3);
        let provider = OpenAiProvider::new(&config).unwrap();

        let err = provider.embed("query").await.unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            OpenAiProvider::new(&config_for(format!("http://{}/v1", addr))).unwrap();
        let err = provider.embed("query").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Unavailable { .. }));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider =
            OpenAiProvider::new(&config_for("http://localhost:9/v1/".to_string())).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:9/v1/embeddings");
    }

    #[test]
    fn test_missing_model_is_config_error() {
        let config = config_for("http://localhost:9/v1".to_string()).with_model(" ");
        assert!(matches!(
            OpenAiProvider::new(&config),
            Err(EmbeddingError::ConfigError { .. })
        ));
    }
}
