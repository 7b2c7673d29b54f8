//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// How `/recommend` answers when no record satisfies the query's constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NoCandidatesPolicy {
    /// 404 with "No assessments found"
    #[default]
    NotFound,
    /// 200 with an empty recommendation list
    EmptyList,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
    pub no_candidates: NoCandidatesPolicy,
    /// Expose `POST /catalog/reload`
    pub enable_reload: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: Vec::new(),
            no_candidates: NoCandidatesPolicy::NotFound,
            enable_reload: false,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn with_no_candidates(mut self, policy: NoCandidatesPolicy) -> Self {
        self.no_candidates = policy;
        self
    }

    pub fn with_reload(mut self, enabled: bool) -> Self {
        self.enable_reload = enabled;
        self
    }
}
