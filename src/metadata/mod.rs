// Per-package metadata lookups

use crate::config::{Config, MAX_WORKERS};
use crate::error::{FetchError, Result};
use crate::search::NO_DESCRIPTION;
use log::{debug, warn};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Longest description kept, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 80;

#[derive(Debug, Deserialize)]
struct PackageDocument {
    info: Option<PackageInfo>,
}

#[derive(Debug, Deserialize)]
struct PackageInfo {
    summary: Option<String>,
}

/// Reduce a raw summary to a display description.
///
/// Trims surrounding whitespace and keeps at most 80 characters. Missing or
/// blank summaries become the placeholder.
pub fn summarize(summary: Option<&str>) -> String {
    match summary.map(str::trim) {
        Some(text) if !text.is_empty() => text.chars().take(MAX_DESCRIPTION_CHARS).collect(),
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// Client for the per-package JSON endpoint
#[derive(Clone)]
pub struct MetadataClient {
    http: reqwest::Client,
    config: Arc<Config>,
    timeout: Duration,
}

impl MetadataClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            config: Arc::new(config.clone()),
            timeout: config.metadata_timeout(),
        }
    }

    /// Fetch one package's description. Only a 200 response is accepted.
    pub async fn fetch_summary(&self, name: &str) -> Result<String> {
        let url = self.config.metadata_url(name);
        let response = self.http.get(&url).timeout(self.timeout).send().await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let document: PackageDocument =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;

        let summary = document.info.as_ref().and_then(|info| info.summary.as_deref());
        Ok(summarize(summary))
    }

    /// Like `fetch_summary`, but any failure yields the placeholder.
    pub async fn describe(&self, name: &str) -> String {
        match self.fetch_summary(name).await {
            Ok(description) => description,
            Err(e) => {
                debug!("No description for {}: {}", name, e);
                NO_DESCRIPTION.to_string()
            }
        }
    }

    /// Look up descriptions for all `names` with at most `max_workers`
    /// requests in flight, clamped to `1..=MAX_WORKERS`. Returns once every
    /// lookup has finished.
    pub async fn enrich(&self, names: &[String], max_workers: usize) -> HashMap<String, String> {
        let permits = Arc::new(Semaphore::new(max_workers.clamp(1, MAX_WORKERS)));
        let mut tasks = JoinSet::new();

        for (slot, name) in names.iter().enumerate() {
            let client = self.clone();
            let permits = Arc::clone(&permits);
            let name = name.clone();
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let description = client.describe(&name).await;
                (slot, description)
            });
        }

        let mut by_slot: HashMap<usize, String> = HashMap::with_capacity(names.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, description)) => {
                    by_slot.insert(slot, description);
                }
                Err(e) => warn!("Metadata lookup task failed: {}", e),
            }
        }

        names
            .iter()
            .enumerate()
            .map(|(slot, name)| {
                let description = by_slot
                    .remove(&slot)
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string());
                (name.clone(), description)
            })
            .collect()
    }
}
