//! Den-Harvest main entry point
//!
//! This is the command-line interface for the Den-Harvest award-image
//! harvester.

use anyhow::Context;
use clap::Parser;
use den_harvest::config::{load_config_with_hash, Config};
use den_harvest::crawler::run_harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Den-Harvest: a ScoutShop award-image harvester
///
/// Den-Harvest searches the catalog for Cub Scout advancement awards,
/// classifies each product by award type and den, downloads the product
/// images into a folder taxonomy, and writes a CSV manifest.
#[derive(Parser, Debug)]
#[command(name = "den-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A ScoutShop award-image harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration: built-in defaults, or a TOML override file
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("Using built-in configuration");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("den_harvest=info,warn"),
            1 => EnvFilter::new("den_harvest=debug,info"),
            2 => EnvFilter::new("den_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be harvested
fn handle_dry_run(config: &Config) {
    println!("=== Den-Harvest Dry Run ===\n");

    println!("Catalog:");
    println!("  Base URL: {}", config.catalog.base_url);
    println!("  Max search pages: {}", config.catalog.max_search_pages);

    println!("\nHarvester:");
    println!("  Retry cap: {}", config.harvester.retry_cap);
    println!(
        "  Retry base delay: {}ms",
        config.harvester.retry_base_delay_ms
    );
    println!("  Page delay: {}ms", config.harvester.page_delay_ms);
    println!("  Download delay: {}ms", config.harvester.download_delay_ms);

    println!("\nOutput:");
    println!("  Root directory: {}", config.output.root_dir);
    println!("  Manifest: {}/catalog.csv", config.output.root_dir);

    println!("\nQueries ({}):", config.queries.len());
    for query in &config.queries {
        println!(
            "  - \"{}\" ({}/{})",
            query.text, query.type_hint, query.den_hint
        );
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would search {} queries, up to {} pages each",
        config.queries.len(),
        config.catalog.max_search_pages
    );
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting harvest: {} queries -> {}",
        config.queries.len(),
        config.output.root_dir
    );

    match run_harvest(config).await {
        Ok(summary) => {
            tracing::info!("Harvest completed successfully");
            println!(
                "Done. {} links, {} recorded, {} downloaded, {} skipped. Catalog: {}/catalog.csv",
                summary.links,
                summary.recorded,
                summary.downloaded,
                summary.skipped,
                config.output.root_dir
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
