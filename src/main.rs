//! Recommendation server
//!
//! Usage:
//!   recommender [--config <path>] [--profile <development|production>]
//!
//! The config path may also come from `RECOMMENDER_CONFIG`, the profile from
//! `RECOMMENDER_PROFILE`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use assessment_recommender::core::{AppConfig, AppContext};
use assessment_recommender::logging::{init_fallback_logging, LogProfile, LoggingSystem};
use assessment_recommender::server::RecommendServer;

/// Environment variable naming the config file
const CONFIG_ENV: &str = "RECOMMENDER_CONFIG";

/// Environment variable naming the logging profile
const PROFILE_ENV: &str = "RECOMMENDER_PROFILE";

struct Args {
    config: Option<PathBuf>,
    profile: Option<LogProfile>,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = std::env::args().skip(1);
        let mut config = None;
        let mut profile = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    config = Some(args.next().map(PathBuf::from).ok_or("--config needs a path")?);
                }
                "--profile" | "-p" => {
                    let value = args.next().ok_or("--profile needs a value")?;
                    profile = Some(value.parse::<LogProfile>()?);
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("Unknown argument: {}", arg));
                }
            }
        }

        let config = config.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let profile = match profile {
            Some(profile) => Some(profile),
            None => std::env::var(PROFILE_ENV)
                .ok()
                .map(|value| value.parse::<LogProfile>())
                .transpose()?,
        };
        Ok(Self { config, profile })
    }
}

fn print_help() {
    println!(
        r#"Assessment recommender - HTTP server

USAGE:
    recommender [OPTIONS]

OPTIONS:
    -c, --config <PATH>    TOML or JSON config file (or set RECOMMENDER_CONFIG)
    -p, --profile <NAME>   Logging profile: development or production
                           (or set RECOMMENDER_PROFILE)
    -h, --help             Print this help message

Any setting can be overridden with RECOMMENDER__<SECTION>__<KEY>,
e.g. RECOMMENDER__SERVER__PORT=9000.
"#
    );
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let ctx = Arc::new(AppContext::init(config).context("failed to initialize application")?);
    RecommendServer::new(Arc::clone(&ctx))
        .serve(shutdown_signal())
        .await
        .context("server failed")?;

    match Arc::try_unwrap(ctx) {
        Ok(ctx) => ctx.shutdown(),
        Err(_) => tracing::warn!("Application context still shared at shutdown"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let config = match AppConfig::load_with_profile(args.config.as_deref(), args.profile) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Kept alive so buffered file output is flushed on exit
    let _logging_system = match LoggingSystem::init(config.logging.clone()) {
        Ok(system) => Some(system),
        Err(e) => {
            eprintln!("Failed to initialize logging system: {}. Using basic logging.", e);
            init_fallback_logging();
            None
        }
    };

    tracing::info!("Starting assessment recommender...");
    if let Err(e) = run(config).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
