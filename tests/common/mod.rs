#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use pip_search::config::Config;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Canned response for one package's JSON endpoint
#[derive(Debug, Clone)]
pub struct MockPackage {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl MockPackage {
    pub fn summary(summary: &str) -> Self {
        Self::raw(&serde_json::json!({ "info": { "summary": summary } }).to_string())
    }

    pub fn null_summary() -> Self {
        Self::raw(r#"{"info": {"summary": null}}"#)
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

/// In-process stand-in for the simple index and JSON API
#[derive(Debug, Clone)]
pub struct MockIndex {
    pub listing_status: u16,
    pub listing_delay: Duration,
    pub listing: Vec<String>,
    pub packages: HashMap<String, MockPackage>,
}

impl Default for MockIndex {
    fn default() -> Self {
        Self {
            listing_status: 200,
            listing_delay: Duration::ZERO,
            listing: Vec::new(),
            packages: HashMap::new(),
        }
    }
}

/// Request counters observed by the mock
#[derive(Debug, Default)]
pub struct MockStats {
    pub listing_requests: AtomicUsize,
    pub metadata_requests: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl MockStats {
    pub fn metadata_requests(&self) -> usize {
        self.metadata_requests.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

struct MockState {
    index: MockIndex,
    stats: Arc<MockStats>,
}

pub struct MockServer {
    pub base_url: String,
    pub stats: Arc<MockStats>,
}

impl MockServer {
    /// Config whose endpoints point at this server
    pub fn config(&self) -> Config {
        Config {
            index_url: format!("{}/simple/", self.base_url),
            json_api_url: format!("{}/pypi", self.base_url),
            ..Config::default()
        }
    }
}

impl MockIndex {
    pub fn with_listing(names: &[&str]) -> Self {
        Self {
            listing: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn package(mut self, name: &str, package: MockPackage) -> Self {
        self.packages.insert(name.to_string(), package);
        self
    }

    pub fn listing_status(mut self, status: u16) -> Self {
        self.listing_status = status;
        self
    }

    pub fn listing_delayed(mut self, millis: u64) -> Self {
        self.listing_delay = Duration::from_millis(millis);
        self
    }

    /// Bind to an ephemeral port and serve until the runtime shuts down
    pub async fn serve(self) -> MockServer {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(MockStats::default());

        let state = Arc::new(MockState {
            index: self,
            stats: Arc::clone(&stats),
        });

        let app = Router::new()
            .route("/simple/", get(listing))
            .route("/pypi/{name}/json", get(package))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockServer {
            base_url: format!("http://{}", addr),
            stats,
        }
    }
}

async fn listing(State(state): State<Arc<MockState>>) -> Response {
    state.stats.listing_requests.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(state.index.listing_delay).await;

    let status = StatusCode::from_u16(state.index.listing_status).unwrap();
    if status != StatusCode::OK {
        return (status, "unavailable").into_response();
    }

    let mut body = String::from("<!DOCTYPE html>\n<html><body>\n");
    for name in &state.index.listing {
        body.push_str(&format!("<a href=\"/simple/{name}/\">{name}</a>\n"));
    }
    body.push_str("</body></html>\n");
    Html(body).into_response()
}

async fn package(State(state): State<Arc<MockState>>, Path(name): Path<String>) -> Response {
    let stats = &state.stats;
    stats.metadata_requests.fetch_add(1, Ordering::SeqCst);
    let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak_in_flight.fetch_max(now, Ordering::SeqCst);

    let response = match state.index.packages.get(&name) {
        Some(pkg) => {
            tokio::time::sleep(pkg.delay).await;
            let status = StatusCode::from_u16(pkg.status).unwrap();
            (status, pkg.body.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    };

    stats.in_flight.fetch_sub(1, Ordering::SeqCst);
    response
}
