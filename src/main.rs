//! Spelunk main entry point
//!
//! This is the command-line interface for the Spelunk gopherspace surveyor.

use anyhow::Context;
use clap::Parser;
use spelunk::config::load_config_with_hash;
use spelunk::crawler::CrawlEngine;
use spelunk::report::{print_report, write_markdown_report};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Spelunk: a gopherspace surveyor
///
/// Spelunk walks every directory reachable from a root selector on one
/// gopher service, downloads the resources it finds under size and time
/// caps, and reports deduplicated statistics over the traversal.
#[derive(Parser, Debug)]
#[command(name = "spelunk")]
#[command(version = "1.0.0")]
#[command(about = "A gopherspace surveyor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("spelunk=info,warn"),
            1 => EnvFilter::new("spelunk=debug,info"),
            2 => EnvFilter::new("spelunk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &spelunk::config::Config) {
    println!("=== Spelunk Dry Run ===\n");

    println!("Target Service:");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Root selector: {:?}", config.server.root_selector);

    println!("\nLimits:");
    println!("  Max download bytes: {}", config.limits.max_download_bytes);
    println!(
        "  Download timeout: {}s",
        config.limits.download_timeout_secs
    );
    println!("  Request retries: {}", config.limits.request_retries);

    println!("\nOutput:");
    println!("  Download dir: {}", config.output.download_dir);
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: spelunk::config::Config) -> anyhow::Result<()> {
    let summary_path = PathBuf::from(&config.output.summary_path);

    let engine = CrawlEngine::new(config);

    // Ctrl-C stops the engine between directory visits
    let stop = engine.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current directory");
            stop.store(true, Ordering::Relaxed);
        }
    });

    let report = match engine.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&report);

    write_markdown_report(&report, &summary_path)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    tracing::info!("Summary written to {}", summary_path.display());

    Ok(())
}
