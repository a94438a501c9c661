//! pvfeed - Solar irradiance climatology with a local cache
//!
//! Fetches monthly irradiance for a point from the NASA POWER API, caches it
//! for seven days and prints feeds as JSON on stdout. Logs go to stderr.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pvfeed::cli::Cli;
use pvfeed::commands::FeedService;
use pvfeed::config::FeedConfig;

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "pvfeed=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = FeedConfig::from_cli(&cli)?;
    tracing::debug!(endpoint = %config.endpoint, cache_file = %config.cache_file.display(), "configured");

    let service = FeedService::from_config(&config)?;

    if let Some(feed) = service.run(cli.command).await? {
        println!("{}", serde_json::to_string_pretty(&feed)?);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
