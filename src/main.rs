use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pip_search::cli::{self, Cli};
use pip_search::config::Config;

fn main() -> Result<()> {
    // Parse CLI arguments; usage errors exit here
    let cli = Cli::parse();
    let query = cli.search_query().unwrap_or_else(|e| e.exit());

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .init();

    // Load configuration
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    info!("Index: {}", config.index_url);
    info!("Metadata API: {}", config.json_api_url);

    cli::search::handle(&cli, &query, &config)
}
