//! Request handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::config::NoCandidatesPolicy;
use super::error::ApiError;
use crate::core::types::Recommendation;
use crate::core::AppContext;
use crate::search::RecommendOutcome;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub catalog_size: usize,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub catalog_size: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        catalog_size: state.ctx.catalog().current().size(),
        model: state.ctx.provider().model().to_string(),
    })
}

/// POST /recommend
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let outcome = state
        .ctx
        .recommender()
        .recommend(&request.query, request.top_k)
        .await?;

    match outcome {
        RecommendOutcome::Ranked(recommendations) => Ok(Json(RecommendResponse { recommendations })),
        RecommendOutcome::NoCandidates { constraints } => {
            tracing::debug!("No candidates for constraints {:?}", constraints);
            match state.ctx.config().server.no_candidates {
                NoCandidatesPolicy::NotFound => Err(ApiError::no_assessments()),
                NoCandidatesPolicy::EmptyList => Ok(Json(RecommendResponse {
                    recommendations: Vec::new(),
                })),
            }
        }
    }
}

/// POST /catalog/reload
pub async fn reload_catalog(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let ctx = Arc::clone(&state.ctx);
    let catalog_size = tokio::task::spawn_blocking(move || ctx.reload_catalog())
        .await
        .map_err(|e| ApiError::Internal {
            reason: e.to_string(),
        })??;
    Ok(Json(ReloadResponse { catalog_size }))
}
