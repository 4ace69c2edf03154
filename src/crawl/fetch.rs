// src/crawl/fetch.rs
// =============================================================================
// This module fetches pages, politely.
//
// Every stage of the crawl fires all of its requests at once, but request
// number N first waits N × interval. That spreads the load on the server
// without any shared state between requests.
//
// PageSource is the seam between the crawler and the network: the real
// implementation wraps a reqwest Client, tests plug in canned pages.
//
// Rust concepts:
// - Traits returning `impl Future`: async methods without extra crates
// - thiserror: a small error enum that wraps reqwest::Error
// =============================================================================

use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

// Sent with every request so site operators can tell who is crawling
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Why a single page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(u16),
}

// Anything that can turn a URL into a page body
pub trait PageSource {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

// PageSource backed by a real HTTP client
//
// The client is built once and shared by every request (connection pooling).
// Timeouts are left at reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        fetch_page(&self.client, url)
    }
}

// Fetches a web page and returns its HTML content
//
// Anything but a 2xx answer counts as a failure.
async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    let html = response.text().await?;
    Ok(html)
}

// Waits `index × interval`, then fetches `url`
//
// Parameters:
//   source: where pages come from
//   url: the page to fetch
//   index: position of this request within its stage
//   interval: spacing between consecutive requests
pub async fn fetch_throttled<S: PageSource>(
    source: &S,
    url: &str,
    index: usize,
    interval: Duration,
) -> Result<String, FetchError> {
    let delay = interval.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    debug!(url, index, "requesting");
    source.get(url).await
}

// In-memory PageSource for tests: unknown URLs answer 404
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StaticSource {
    pages: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StaticSource {
    pub(crate) fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

#[cfg(test)]
impl PageSource for StaticSource {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        let page = self.pages.get(url).cloned();
        async move { page.ok_or(FetchError::Status(404)) }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does the trait return `impl Future` instead of using `async fn`?
//    - Both work, but writing the return type out lets us promise `+ Send`
//    - Send means the future may move between threads of the tokio runtime
//
// 2. What does #[from] do in the error enum?
//    - It generates `impl From<reqwest::Error> for FetchError`
//    - That is what lets `?` turn a reqwest error into a FetchError
//
// 3. What is Duration::saturating_mul?
//    - Multiplies, but stops at the maximum value instead of overflowing
//
// 4. Why #[cfg(test)] on StaticSource?
//    - The type only exists when compiling tests
//    - Release builds never contain it
// -----------------------------------------------------------------------------
