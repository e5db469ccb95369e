//! Site-Harvester main entry point
//!
//! This is the command-line interface for the Site-Harvester page harvester.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use site_harvester::config::{load_optional_config, validate, validate_seed_url, DEFAULT_CONFIG_FILE};
use site_harvester::crawler::Coordinator;
use site_harvester::output::{export, print_summary, run_timestamp};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Site-Harvester: a breadth-first single-site harvester
///
/// Crawls every page reachable from URL on the same host, collecting links,
/// emails, phone numbers, forms and metadata, then writes JSON, CSV and
/// summary files.
#[derive(Parser, Debug)]
#[command(name = "site-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first single-site harvester", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Pause between requests, in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Maximum number of pages to visit
    #[arg(long)]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let started = Local::now();

    // Configuration file is optional; the command line wins
    let config_path = Path::new(DEFAULT_CONFIG_FILE);
    let (mut config, config_hash) = load_optional_config(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(delay) = cli.delay {
        config.crawler.delay_secs = delay;
    }
    if cli.max_pages.is_some() {
        config.crawler.max_pages = cli.max_pages;
    }
    validate(&config).context("Invalid configuration")?;
    let seed = validate_seed_url(&cli.url)?;

    let _guard = setup_logging(Path::new(&config.output.log_directory), &run_timestamp(&started))?;
    match &config_hash {
        Some(hash) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            config_path.display(),
            hash
        ),
        None => tracing::info!("No {} found, using defaults", config_path.display()),
    }

    println!("Starting scrape of {}", seed);
    tracing::info!(
        "Delay: {}s, max pages: {}",
        config.crawler.delay_secs,
        config
            .crawler
            .max_pages
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unlimited".to_string())
    );

    let output_dir = config.output.directory.clone();
    let coordinator = Coordinator::from_config(config, seed)?;

    // Ctrl+C stops the crawl; results so far are still exported
    let cancel = coordinator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping crawl");
            cancel.cancel();
        }
    });

    let report = coordinator.run().await?;
    let pages = report.pages_scraped();

    match export(&report, Path::new(&output_dir), &started) {
        Ok((paths, summary)) => {
            tracing::info!(
                "Results saved to {}, {} and {}",
                paths.results_json.display(),
                paths.results_csv.display(),
                paths.summary_json.display()
            );
            print_summary(&summary);
        }
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            return Err(e.into());
        }
    }

    println!("Scraping complete. Processed {} pages.", pages);
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Sets up a per-run log file plus compact stderr output
///
/// The returned guard flushes the file writer when dropped.
fn setup_logging(log_dir: &Path, ts: &str) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(log_dir, format!("scraping_{}.log", ts));
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(env_filter());

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(guard)
}
