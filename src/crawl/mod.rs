// src/crawl/mod.rs
// =============================================================================
// This module handles crawling the blog platform.
//
// Features:
// - Paginated directory traversal to find abandoned blogs
// - Per-blog homepage and comment page crawling
// - Polite crawling: requests of a stage are staggered by a fixed interval
// - Failed requests are logged and skipped, never retried
//
// Submodules:
// - fetch: the PageSource trait, the reqwest-backed source, throttling
// - pipeline: the three crawl stages and their merge into the registry
// =============================================================================

mod fetch;
mod pipeline;

pub use fetch::HttpSource;
pub use pipeline::{CrawlSettings, Pipeline};
