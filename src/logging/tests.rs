//! Tests for the logging system

use super::*;
use tempfile::TempDir;

#[test]
fn test_log_level_display() {
    assert_eq!(LogLevel::Trace.to_string(), "trace");
    assert_eq!(LogLevel::Debug.to_string(), "debug");
    assert_eq!(LogLevel::Info.to_string(), "info");
    assert_eq!(LogLevel::Warn.to_string(), "warn");
    assert_eq!(LogLevel::Error.to_string(), "error");
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, LogLevel::Info);
    assert_eq!(config.format, LogFormat::Text);
    assert_eq!(config.output, LogOutput::Console);
    assert_eq!(config.rotation, LogRotation::Daily);
    assert!(config.fields.target);
    assert!(!config.fields.thread_ids);
    assert!(config.directory.is_none());
}

#[test]
fn test_logging_config_builder() {
    let config = LoggingConfig::default()
        .with_level(LogLevel::Debug)
        .with_format(LogFormat::Json)
        .with_output(LogOutput::File)
        .with_fields(LogFields {
            target: false,
            ..LogFields::default()
        })
        .with_rotation(LogRotation::Hourly)
        .with_module_level("assessment_recommender::search", LogLevel::Trace);

    assert_eq!(config.level, LogLevel::Debug);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.output, LogOutput::File);
    assert_eq!(config.rotation, LogRotation::Hourly);
    assert!(!config.fields.target);
    assert_eq!(
        config.module_levels.get("assessment_recommender::search"),
        Some(&LogLevel::Trace)
    );
}

#[test]
fn test_profiles() {
    let dev = LoggingConfig::for_profile(LogProfile::Development);
    assert_eq!(dev.level, LogLevel::Debug);
    assert_eq!(dev.output, LogOutput::Console);
    assert_eq!(dev.rotation, LogRotation::Never);
    assert!(dev.fields.location);

    let prod = LoggingConfig::for_profile(LogProfile::Production);
    assert_eq!(prod.level, LogLevel::Info);
    assert_eq!(prod.format, LogFormat::Json);
    assert_eq!(prod.output, LogOutput::Both);
    assert!(prod.directory.is_some());
    assert_eq!(prod.module_levels.get("tower_http"), Some(&LogLevel::Warn));
    assert_eq!(prod.module_levels.get("reqwest"), Some(&LogLevel::Warn));
}

#[test]
fn test_profile_from_str() {
    assert_eq!("dev".parse::<LogProfile>(), Ok(LogProfile::Development));
    assert_eq!("Production".parse::<LogProfile>(), Ok(LogProfile::Production));
    assert_eq!(" prod ".parse::<LogProfile>(), Ok(LogProfile::Production));
    assert!("staging".parse::<LogProfile>().is_err());
}

#[test]
fn test_logging_config_deserializes_partial() {
    let config: LoggingConfig =
        serde_json::from_str(r#"{"level": "warn", "format": "json", "fields": {"location": true}}"#)
            .unwrap();
    assert_eq!(config.level, LogLevel::Warn);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.output, LogOutput::Console);
    assert!(config.fields.location);
    assert!(config.fields.target);
}

#[test]
fn test_output_writes_file() {
    assert!(!LogOutput::Console.writes_file());
    assert!(LogOutput::File.writes_file());
    assert!(LogOutput::Both.writes_file());
}

#[test]
fn test_env_filter_includes_module_levels() {
    let config = LoggingConfig::default()
        .with_level(LogLevel::Warn)
        .with_module_level("assessment_recommender", LogLevel::Debug);
    let filter = LoggingSystem::build_env_filter(&config).to_string();
    assert!(filter.contains("warn"));
    assert!(filter.contains("assessment_recommender=debug"));
}

#[test]
fn test_resolved_directory_prefers_configured() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig::default().with_directory(temp_dir.path());
    assert_eq!(config.resolved_directory(), temp_dir.path());
}

#[test]
fn test_init_with_file_output_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");
    let config = LoggingConfig::default()
        .with_output(LogOutput::File)
        .with_rotation(LogRotation::Never)
        .with_directory(log_dir.clone());

    // Only this test installs a global subscriber
    let system = LoggingSystem::init(config).unwrap();
    assert!(log_dir.exists());
    assert_eq!(system.log_directory(), Some(&log_dir));
    assert_eq!(system.log_level(), LogLevel::Info);
    tracing::info!("logging test line");
}
