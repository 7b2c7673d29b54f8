//! Core module
//!
//! This module contains:
//! - Configuration loading
//! - Error types and recovery hints
//! - Core data types
//! - The application context

pub mod config;
pub mod context;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::{AppConfig, CatalogConfig};
pub use context::AppContext;
pub use error::{
    ConfigError, ErrorRecovery, RecommenderError, RecoveryAction, Result, DEFAULT_RETRY_DELAY_MS,
    MAX_RETRY_DELAY_MS,
};
