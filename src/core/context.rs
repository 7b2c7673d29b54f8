//! Application context
//!
//! Built once at startup from [`AppConfig`]. Owns the shared catalog, the
//! embedding provider, and the recommender, and is the only place a catalog
//! reload happens.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::config::AppConfig;
use super::error::Result;
use crate::catalog::{Catalog, CatalogSnapshot, SharedCatalog};
use crate::embeddings::{CachedProvider, EmbeddingProvider, OpenAiProvider};
use crate::search::Recommender;

/// Long-lived state shared by every request
pub struct AppContext {
    config: AppConfig,
    catalog: SharedCatalog,
    provider: Arc<dyn EmbeddingProvider>,
    recommender: Arc<Recommender>,
}

impl AppContext {
    /// Load the catalog snapshot and connect the configured provider
    pub fn init(config: AppConfig) -> Result<Self> {
        let provider: Arc<dyn EmbeddingProvider> = Arc::new(OpenAiProvider::new(&config.embedding)?);
        let provider: Arc<dyn EmbeddingProvider> = if config.embedding.cache_capacity > 0 {
            Arc::new(CachedProvider::new(provider, config.embedding.cache_capacity))
        } else {
            provider
        };

        let catalog = load_snapshot(&config.catalog.snapshot_path, provider.model())?;
        Ok(Self::with_parts(config, catalog, provider))
    }

    /// Assemble a context from an already-built catalog and provider
    pub fn with_parts(config: AppConfig, catalog: Catalog, provider: Arc<dyn EmbeddingProvider>) -> Self {
        info!(
            "Application context ready: {} assessments, model {}",
            catalog.size(),
            provider.model()
        );
        let catalog = SharedCatalog::new(catalog);
        let recommender = Arc::new(Recommender::new(
            catalog.clone(),
            provider.clone(),
            config.search.clone(),
        ));
        Self {
            config,
            catalog,
            provider,
            recommender,
        }
    }

    /// Re-read the snapshot and publish it; returns the new catalog size.
    ///
    /// On failure the current catalog stays in place.
    pub fn reload_catalog(&self) -> Result<usize> {
        let catalog = load_snapshot(&self.config.catalog.snapshot_path, self.provider.model())?;
        let size = catalog.size();
        let previous = self.catalog.publish(catalog);
        info!("Catalog reloaded: {} -> {} assessments", previous.size(), size);
        Ok(size)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    pub fn recommender(&self) -> Arc<Recommender> {
        Arc::clone(&self.recommender)
    }

    /// Release resources held by the context
    pub fn shutdown(self) {
        info!(
            "Shutting down with {} assessments loaded",
            self.catalog.current().size()
        );
    }
}

fn load_snapshot(path: &Path, provider_model: &str) -> Result<Catalog> {
    let snapshot = CatalogSnapshot::read(path)?;
    if snapshot.model != provider_model {
        warn!(
            "Snapshot {:?} was embedded with model '{}' but queries use '{}'",
            path, snapshot.model, provider_model
        );
    }
    Ok(snapshot.into_catalog()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AssessmentRecord, EmbeddingVector};
    use crate::embeddings::PrecomputedProvider;
    use crate::search::RecommendOutcome;
    use tempfile::TempDir;

    fn write_snapshot(path: &Path, names: &[&str]) {
        let records = names
            .iter()
            .map(|n| AssessmentRecord::new(*n, format!("https://catalog.test/{}", n)))
            .collect();
        let vectors = names
            .iter()
            .map(|_| EmbeddingVector::new(vec![1.0, 0.0]))
            .collect();
        CatalogSnapshot::new("fixed", records, vectors)
            .unwrap()
            .write(path)
            .unwrap();
    }

    fn context_for(path: &Path) -> AppContext {
        let mut config = AppConfig::default();
        config.catalog.snapshot_path = path.to_path_buf();
        let provider = PrecomputedProvider::new("fixed").with_vector("q", vec![1.0, 0.0]);
        let catalog = load_snapshot(path, "fixed").unwrap();
        AppContext::with_parts(config, catalog, Arc::new(provider))
    }

    #[tokio::test]
    async fn test_reload_publishes_new_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        write_snapshot(&path, &["a"]);
        let ctx = context_for(&path);
        assert_eq!(ctx.catalog().current().size(), 1);

        write_snapshot(&path, &["a", "b"]);
        assert_eq!(ctx.reload_catalog().unwrap(), 2);

        let outcome = ctx.recommender().recommend("q", None).await.unwrap();
        assert!(matches!(outcome, RecommendOutcome::Ranked(ref recs) if recs.len() == 2));
    }

    #[test]
    fn test_failed_reload_keeps_current_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        write_snapshot(&path, &["a"]);
        let ctx = context_for(&path);

        std::fs::write(&path, "not json").unwrap();
        assert!(ctx.reload_catalog().is_err());
        assert_eq!(ctx.catalog().current().size(), 1);
        ctx.shutdown();
    }

    #[test]
    fn test_init_without_api_key_fails() {
        std::env::remove_var(crate::embeddings::API_KEY_ENV);
        let err = AppContext::init(AppConfig::default()).err().unwrap();
        assert!(matches!(
            err,
            crate::core::error::RecommenderError::Embedding(
                crate::embeddings::EmbeddingError::ConfigError { .. }
            )
        ));
    }
}
