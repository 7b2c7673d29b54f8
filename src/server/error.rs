//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::core::RecommenderError;
use crate::search::SearchError;

/// Message returned when no assessment satisfies a query
pub const NO_ASSESSMENTS_FOUND: &str = "No assessments found";

/// Errors surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("{reason}")]
    NotFound { reason: String },

    /// Embedding provider failed
    #[error("Embedding provider error: {reason}")]
    Upstream { reason: String },

    #[error("Internal server error: {reason}")]
    Internal { reason: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyQuery => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn no_assessments() -> Self {
        ApiError::NotFound {
            reason: NO_ASSESSMENTS_FOUND.to_string(),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::EmptyQuery => ApiError::EmptyQuery,
            SearchError::DegenerateQuery => ApiError::Internal {
                reason: SearchError::DegenerateQuery.to_string(),
            },
            SearchError::Embedding(e) => ApiError::Upstream {
                reason: e.to_string(),
            },
        }
    }
}

impl From<RecommenderError> for ApiError {
    fn from(err: RecommenderError) -> Self {
        match err {
            RecommenderError::Search(e) => e.into(),
            other => ApiError::Internal {
                reason: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("Request failed with {}: {}", status, self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
