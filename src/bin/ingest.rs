//! Catalog ingestion
//!
//! Embeds a scraped assessment feed and writes a catalog snapshot the
//! server can load.
//!
//! Usage:
//!   ingest --input <scraped.json> --output <snapshot.json> [--config <path>]

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use assessment_recommender::catalog::{load_records, Catalog, CatalogSnapshot};
use assessment_recommender::core::types::{AssessmentRecord, EmbeddingVector};
use assessment_recommender::core::{AppConfig, ErrorRecovery, RecommenderError, RecoveryAction};
use assessment_recommender::embeddings::{EmbeddingProvider, OpenAiProvider};
use assessment_recommender::logging::{init_fallback_logging, LoggingSystem};

/// Command line arguments
struct Args {
    /// Scraped record array
    input: PathBuf,
    /// Snapshot destination
    output: PathBuf,
    /// Optional config file
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = std::env::args().skip(1);
        let mut input = None;
        let mut output = None;
        let mut config = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" | "-i" => {
                    input = args.next().map(PathBuf::from);
                }
                "--output" | "-o" => {
                    output = args.next().map(PathBuf::from);
                }
                "--config" | "-c" => {
                    config = args.next().map(PathBuf::from);
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

        Ok(Self {
            input: input.ok_or("--input is required")?,
            output: output.ok_or("--output is required")?,
            config,
        })
    }
}

fn print_help() {
    println!(
        r#"Assessment recommender - catalog ingestion

USAGE:
    ingest [OPTIONS] --input <PATH> --output <PATH>

OPTIONS:
    -i, --input <PATH>     Scraped assessment records (JSON array, required)
    -o, --output <PATH>    Snapshot file to write (required)
    -c, --config <PATH>    TOML or JSON config file
    -h, --help             Print this help message

The embedding API key is read from the config or OPENAI_API_KEY.
"#
    );
}

/// Drop records whose url was already seen, keeping the first
fn dedup_by_url(records: Vec<AssessmentRecord>) -> Vec<AssessmentRecord> {
    let mut seen = HashSet::new();
    let before = records.len();
    let kept: Vec<AssessmentRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.url.clone()))
        .collect();
    if kept.len() != before {
        tracing::warn!("Dropped {} records with duplicate urls", before - kept.len());
    }
    kept
}

/// Embed one batch, retrying failures whose recovery action is
/// [`RecoveryAction::Retry`] with capped exponential backoff
async fn embed_batch(
    provider: &OpenAiProvider,
    batch: &[String],
    max_retries: u32,
) -> Result<Vec<EmbeddingVector>, RecommenderError> {
    let mut attempt = 0u32;
    loop {
        let err = match provider.embed_many(batch).await {
            Ok(vectors) => return Ok(vectors),
            Err(e) => RecommenderError::from(e),
        };
        if err.recovery_action() != RecoveryAction::Retry || attempt >= max_retries {
            return Err(err);
        }
        let delay = err.backoff_delay_ms(attempt);
        attempt += 1;
        tracing::warn!(
            "Embedding batch failed ({}), retry {}/{} in {}ms",
            err,
            attempt,
            max_retries,
            delay
        );
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

async fn run(args: Args, config: AppConfig) -> anyhow::Result<()> {
    let started = Instant::now();
    let records = load_records(&args.input)
        .with_context(|| format!("failed to read records from {:?}", args.input))?;
    let records = dedup_by_url(records);
    if records.is_empty() {
        bail!("no records in {:?}", args.input);
    }
    tracing::info!("Embedding {} records", records.len());

    let provider = OpenAiProvider::new(&config.embedding).context("invalid embedding config")?;
    let texts: Vec<String> = records.iter().map(AssessmentRecord::embedding_text).collect();

    let mut vectors = Vec::with_capacity(texts.len());
    for (i, batch) in texts.chunks(config.embedding.batch_size).enumerate() {
        let batch_vectors = embed_batch(&provider, batch, config.embedding.max_retries)
            .await
            .with_context(|| format!("embedding batch {} failed", i))?;
        vectors.extend(batch_vectors);
        tracing::debug!("Embedded {}/{}", vectors.len(), texts.len());
    }

    let catalog = Catalog::load(records, vectors).context("embedded catalog is invalid")?;
    let (records, vectors) = catalog.into_parts();
    CatalogSnapshot::new(provider.model(), records, vectors)?
        .write(&args.output)
        .with_context(|| format!("failed to write snapshot to {:?}", args.output))?;

    tracing::info!(
        duration_ms = started.elapsed().as_millis() as u64,
        "Ingestion completed: {:?}",
        args.output
    );
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

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let _logging_system = match LoggingSystem::init(config.logging.clone()) {
        Ok(system) => Some(system),
        Err(_) => {
            init_fallback_logging();
            None
        }
    };

    if let Err(e) = run(args, config).await {
        tracing::error!("Ingestion failed: {:#}", e);
        std::process::exit(1);
    }
}
