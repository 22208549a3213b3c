use crate::cli::Cli;
use crate::config::Config;
use crate::index::IndexClient;
use crate::metadata::MetadataClient;
use crate::search::{rank, MatchResult, SearchQuery};
use anyhow::{Context, Result};
use log::{info, warn};

/// Handle a search invocation: list, rank, enrich, print
pub fn handle(cmd: &Cli, query: &SearchQuery, config: &Config) -> Result<()> {
    let count = cmd.count.unwrap_or(config.default_count);
    let workers = cmd.workers.unwrap_or(config.max_workers);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let results = rt.block_on(search(config, query, count, workers))?;

    cmd.format.print(&results, query)
}

/// Run the full pipeline and return the ranked, described results.
///
/// Remote failures never surface as errors: an unreachable listing yields
/// no results, and a failed lookup yields the placeholder description.
pub async fn search(
    config: &Config,
    query: &SearchQuery,
    count: usize,
    workers: usize,
) -> Result<Vec<MatchResult>> {
    let http = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")?;

    let names = match IndexClient::new(http.clone(), config).fetch_package_names().await {
        Ok(names) => names,
        Err(e) => {
            warn!("Package listing unavailable: {}", e);
            Vec::new()
        }
    };

    let mut results: Vec<MatchResult> = rank(&names, query, count)
        .into_iter()
        .map(|name| MatchResult::new(name, query))
        .collect();
    info!("{} of {} packages matched '{}'", results.len(), names.len(), query);

    if results.is_empty() {
        return Ok(results);
    }

    let ranked: Vec<String> = results.iter().map(|r| r.name.clone()).collect();
    let descriptions = MetadataClient::new(http, config)
        .enrich(&ranked, workers)
        .await;

    for result in &mut results {
        if let Some(description) = descriptions.get(&result.name) {
            result.description = description.clone();
        }
    }

    Ok(results)
}
