//! HTTP front end
//!
//! Routes:
//! - `GET /health`
//! - `POST /recommend`
//! - `POST /catalog/reload` (when enabled)

mod config;
mod error;
mod routes;

#[cfg(test)]
mod tests;

pub use config::{NoCandidatesPolicy, ServerConfig};
pub use error::{ApiError, NO_ASSESSMENTS_FOUND};
pub use routes::{AppState, HealthResponse, RecommendRequest, RecommendResponse, ReloadResponse};

use std::future::Future;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::{AppContext, RecommenderError, Result};

/// The recommendation HTTP server
pub struct RecommendServer {
    state: AppState,
}

impl RecommendServer {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            state: AppState { ctx },
        }
    }

    fn config(&self) -> &ServerConfig {
        &self.state.ctx.config().server
    }

    /// Build the router with all routes and middleware
    pub fn build_router(&self) -> Router {
        let config = self.config();

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
        let cors = if config.allowed_origins.is_empty() {
            cors.allow_origin(Any)
        } else {
            cors.allow_origin(
                config
                    .allowed_origins
                    .iter()
                    .filter_map(|o| o.parse::<HeaderValue>().ok())
                    .collect::<Vec<_>>(),
            )
        };

        let mut router = Router::new()
            .route("/health", get(routes::health))
            .route("/recommend", post(routes::recommend));
        if config.enable_reload {
            router = router.route("/catalog/reload", post(routes::reload_catalog));
        }

        router
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
                    tracing::info_span!(
                        "request",
                        id = %Uuid::now_v7(),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
            )
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Serve until `shutdown` resolves
    pub async fn serve<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config().bind_address();
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RecommenderError::Server {
                reason: format!("bind {} failed: {}", addr, e),
            })?;
        tracing::info!("Recommendation server listening on {}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RecommenderError::Server {
                reason: e.to_string(),
            })?;

        tracing::info!("Recommendation server stopped");
        Ok(())
    }
}
