//! Logging configuration types

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive spelling understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event, for log shippers
    Json,
}

/// Where events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl LogOutput {
    pub fn writes_file(&self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

/// Optional metadata attached to each event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFields {
    /// Module path of the emitting code
    pub target: bool,
    pub thread_ids: bool,
    /// Source file and line
    pub location: bool,
}

impl Default for LogFields {
    fn default() -> Self {
        Self {
            target: true,
            thread_ids: false,
            location: false,
        }
    }
}

/// Named starting points for the `logging` section.
///
/// The server picks one with `--profile`; file and environment settings are
/// layered on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogProfile {
    /// Verbose console output with source locations
    Development,
    /// JSON to console and a daily file; HTTP client and middleware noise muted
    Production,
}

impl FromStr for LogProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(LogProfile::Development),
            "prod" | "production" => Ok(LogProfile::Production),
            other => Err(format!("unknown log profile: {}", other)),
        }
    }
}

/// The `logging` section of the application config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for everything without a module override
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,

    /// Log file directory; defaults to the platform data dir
    pub directory: Option<PathBuf>,

    /// Per-module overrides, e.g. `tower_http = "warn"`
    pub module_levels: HashMap<String, LogLevel>,

    pub fields: LogFields,
    pub rotation: LogRotation,
}

impl LoggingConfig {
    /// Settings for `profile`
    pub fn for_profile(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Self {
                level: LogLevel::Debug,
                fields: LogFields {
                    target: true,
                    thread_ids: true,
                    location: true,
                },
                rotation: LogRotation::Never,
                ..Self::default()
            },
            LogProfile::Production => Self {
                format: LogFormat::Json,
                output: LogOutput::Both,
                directory: Some(default_log_directory()),
                module_levels: [("tower_http", LogLevel::Warn), ("reqwest", LogLevel::Warn)]
                    .into_iter()
                    .map(|(module, level)| (module.to_string(), level))
                    .collect(),
                ..Self::default()
            },
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    pub fn with_module_level(mut self, module: impl Into<String>, level: LogLevel) -> Self {
        self.module_levels.insert(module.into(), level);
        self
    }

    pub fn with_fields(mut self, fields: LogFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_rotation(mut self, rotation: LogRotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Directory log files go to, falling back to the platform default
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_log_directory)
    }
}

fn default_log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("assessment-recommender").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
