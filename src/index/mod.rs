// Package listing client

use crate::config::Config;
use crate::error::{FetchError, Result};
use log::{debug, info};
use regex::Regex;
use std::sync::OnceLock;

/// Anchor entries on the simple index page: `<a href="/simple/<name>/">`
fn listing_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<a href="/simple/([^/]+)/">"#).expect("listing pattern is valid")
    })
}

/// Extract package names from a listing page, in page order.
///
/// Entries that do not match the anchor shape are skipped. No deduplication.
pub fn parse_listing(body: &str) -> Vec<String> {
    listing_pattern()
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Client for the index listing endpoint
#[derive(Clone)]
pub struct IndexClient {
    http: reqwest::Client,
    index_url: String,
    timeout: std::time::Duration,
}

impl IndexClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            index_url: config.index_url.clone(),
            timeout: config.listing_timeout(),
        }
    }

    /// Fetch every published package name.
    pub async fn fetch_package_names(&self) -> Result<Vec<String>> {
        info!("Fetching package listing from {}", self.index_url);

        let response = self
            .http
            .get(&self.index_url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let names = parse_listing(&body);
        debug!("Listing contained {} packages", names.len());

        Ok(names)
    }
}
