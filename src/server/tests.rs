//! Tests for the HTTP routes

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::catalog::Catalog;
use crate::core::types::{AssessmentRecord, EmbeddingVector, TestType};
use crate::core::AppConfig;
use crate::embeddings::PrecomputedProvider;

fn catalog() -> Catalog {
    Catalog::load(
        vec![
            AssessmentRecord::new("Java 8", "https://catalog.test/java-8")
                .with_duration(30)
                .with_remote(true)
                .with_test_types([TestType::KnowledgeSkills]),
            AssessmentRecord::new("OPQ32", "https://catalog.test/opq32")
                .with_duration(25)
                .with_remote(true)
                .with_test_types([TestType::Personality]),
        ],
        vec![
            EmbeddingVector::new(vec![1.0, 0.0]),
            EmbeddingVector::new(vec![0.0, 1.0]),
        ],
    )
    .unwrap()
}

fn provider() -> PrecomputedProvider {
    PrecomputedProvider::new("fixed-model")
        .with_vector("java developer", vec![1.0, 0.2])
        .with_vector("zero", vec![0.0, 0.0])
        .with_vector("wrong size", vec![1.0, 0.0, 0.0])
}

fn router_with(config: AppConfig) -> axum::Router {
    let ctx = AppContext::with_parts(config, catalog(), Arc::new(provider()));
    RecommendServer::new(Arc::new(ctx)).build_router()
}

fn router() -> axum::Router {
    router_with(AppConfig::default())
}

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.catalog_size, 2);
    assert_eq!(health.model, "fixed-model");
}

#[tokio::test]
async fn test_recommend_returns_ranked_list() {
    let (status, body) =
        post_json(router(), "/recommend", json!({ "query": "java developer" })).await;
    assert_eq!(status, StatusCode::OK);

    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["name"], "Java 8");
    assert_eq!(recs[0]["duration_minutes"], 30);
    assert_eq!(recs[0]["test_types"][0]["code"], "K");
    assert_eq!(recs[0]["test_types"][0]["label"], "Knowledge & Skills");
}

#[tokio::test]
async fn test_recommend_respects_top_k() {
    let (status, body) = post_json(
        router(),
        "/recommend",
        json!({ "query": "java developer", "top_k": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_blank_query_is_bad_request() {
    let (status, body) = post_json(router(), "/recommend", json!({ "query": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Query cannot be empty");
}

#[tokio::test]
async fn test_no_candidates_is_not_found_by_default() {
    // Nothing in the catalog is a cognitive assessment
    let (status, body) =
        post_json(router(), "/recommend", json!({ "query": "cognitive test" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], NO_ASSESSMENTS_FOUND);
}

#[tokio::test]
async fn test_no_candidates_can_be_empty_list() {
    let mut config = AppConfig::default();
    config.server = config
        .server
        .with_no_candidates(NoCandidatesPolicy::EmptyList);
    let (status, body) =
        post_json(router_with(config), "/recommend", json!({ "query": "cognitive test" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "recommendations": [] }));
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let (status, _) = post_json(router(), "/recommend", json!({ "query": "unknown text" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, _) = post_json(router(), "/recommend", json!({ "query": "wrong size" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_degenerate_query_is_internal_error() {
    let (status, _) = post_json(router(), "/recommend", json!({ "query": "zero" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_reload_route_is_disabled_by_default() {
    let (status, _) = post_json(router(), "/catalog/reload", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reload_route_when_enabled() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    let (records, vectors) = catalog().into_parts();
    crate::catalog::CatalogSnapshot::new("fixed-model", records[..1].to_vec(), vectors[..1].to_vec())
        .unwrap()
        .write(&path)
        .unwrap();

    let mut config = AppConfig::default();
    config.catalog.snapshot_path = path;
    config.server = config.server.with_reload(true);

    let (status, body) = post_json(router_with(config), "/catalog/reload", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["catalog_size"], 1);
}

#[test]
fn test_api_error_status_codes() {
    assert_eq!(ApiError::EmptyQuery.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(ApiError::no_assessments().status_code(), StatusCode::NOT_FOUND);
    let err: ApiError = crate::search::SearchError::DegenerateQuery.into();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_bind_address() {
    let config = ServerConfig::default();
    assert_eq!(config.bind_address(), "127.0.0.1:8000");
}
