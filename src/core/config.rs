//! Application configuration
//!
//! Layers, lowest first: an optional logging profile, an optional TOML/JSON
//! file, then environment variables prefixed with `RECOMMENDER`, using `__`
//! between path segments (e.g. `RECOMMENDER__SEARCH__TOP_K=5`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ConfigError;
use crate::embeddings::EmbeddingConfig;
use crate::logging::{LogProfile, LoggingConfig};
use crate::search::RankerConfig;
use crate::server::ServerConfig;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "RECOMMENDER";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog snapshot location
    pub catalog: CatalogConfig,

    /// Retrieval settings
    pub search: RankerConfig,

    /// Embedding provider settings
    pub embedding: EmbeddingConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Where the embedded catalog lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub snapshot_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("data/catalog.json"),
        }
    }
}

/// Serializes as `{ logging: ... }` so a profile only seeds that section
#[derive(Serialize)]
struct LoggingLayer<'a> {
    logging: &'a LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `path` (if any) and the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_profile(path, None)
    }

    /// Like [`AppConfig::load`], with the `logging` section starting from
    /// `profile` instead of the built-in defaults
    pub fn load_with_profile(
        path: Option<&Path>,
        profile: Option<LogProfile>,
    ) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(profile) = profile {
            debug!("Seeding logging settings from {:?} profile", profile);
            let preset = LoggingConfig::for_profile(profile);
            builder = builder.add_source(config::Config::try_from(&LoggingLayer {
                logging: &preset,
            })?);
        }
        if let Some(path) = path {
            debug!("Loading configuration from {:?}", path);
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins"),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.top_k == 0 {
            return Err(invalid("search.top_k", self.search.top_k));
        }
        if self.embedding.batch_size == 0 {
            return Err(invalid("embedding.batch_size", self.embedding.batch_size));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port", self.server.port));
        }
        if self.embedding.model.trim().is_empty() {
            return Err(invalid("embedding.model", "<empty>"));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}
