// src/crawl/pipeline.rs
// =============================================================================
// This module runs the three crawl stages.
//
// How it works:
// 1. Directory: fetch directory pages 0..pages, collect idle blogs (suspects)
// 2. Homepages: fetch every suspect's homepage, collect posts with comments
// 3. Comments: fetch every candidate post, count guest spam per blog
//
// Each stage fires all of its requests at once (with staggered delays, see
// fetch.rs), waits for every one of them, and only then merges the results
// into the SuspectRegistry. A failed request is logged and skipped.
//
// Rust concepts:
// - futures::future::join_all: wait for a whole batch of futures
// - Generic over a trait (PageSource) so tests can run without a network
// - Iterator::enumerate: gives each request its position for throttling
// =============================================================================

use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::fetch::{fetch_throttled, PageSource};
use crate::blog::SuspectRegistry;
use crate::extract::{extract_candidate_posts, extract_comment_authors, extract_suspects};
use crate::site::SiteProfile;
use crate::whitelist::{classify, Whitelist};

// Knobs for one crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Number of directory pages to scan
    pub pages: usize,
    /// A blog is a suspect when its last post is older than this (days)
    pub abandoned_days: u32,
    /// Spacing of directory and homepage requests
    pub page_interval: Duration,
    /// Spacing of comment page requests
    pub post_interval: Duration,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            pages: 10,
            abandoned_days: 365,
            page_interval: Duration::from_millis(100),
            post_interval: Duration::from_millis(50),
        }
    }
}

// Request counts per stage, for the final log line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub directory_pages: usize,
    pub directory_failures: usize,
    pub homepages: usize,
    pub homepage_failures: usize,
    pub posts: usize,
    pub post_failures: usize,
}

// What a finished crawl hands to the report
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub registry: SuspectRegistry,
    pub stats: CrawlStats,
}

pub struct Pipeline<'a, S> {
    source: &'a S,
    profile: &'a SiteProfile,
    whitelist: &'a Whitelist,
    settings: CrawlSettings,
}

impl<'a, S: PageSource> Pipeline<'a, S> {
    pub fn new(
        source: &'a S,
        profile: &'a SiteProfile,
        whitelist: &'a Whitelist,
        settings: CrawlSettings,
    ) -> Self {
        Self {
            source,
            profile,
            whitelist,
            settings,
        }
    }

    // Runs all three stages in order
    pub async fn run(&self) -> CrawlOutcome {
        let mut stats = CrawlStats::default();

        let mut registry = self.scan_directory(&mut stats).await;
        info!(
            pages = stats.directory_pages,
            suspects = registry.len(),
            failed = stats.directory_failures,
            "directory scan finished"
        );

        self.collect_posts(&mut registry, &mut stats).await;
        info!(
            blogs = stats.homepages,
            posts = stats.posts,
            failed = stats.homepage_failures,
            "homepage scan finished"
        );

        self.inspect_posts(&mut registry, &mut stats).await;
        info!(
            posts = stats.posts,
            failed = stats.post_failures,
            "comment scan finished"
        );

        CrawlOutcome { registry, stats }
    }

    // Stage 1: directory pages -> suspects
    async fn scan_directory(&self, stats: &mut CrawlStats) -> SuspectRegistry {
        // Build one future per directory page; nothing runs until join_all
        let requests = (0..self.settings.pages).map(|page| {
            let url = self.profile.directory_page_url(page);
            async move {
                let result = fetch_throttled(self.source, &url, page, self.settings.page_interval)
                    .await
                    .map(|body| extract_suspects(&body, self.profile, self.settings.abandoned_days));
                info!(page, "directory page done");
                (url, result)
            }
        });

        // Fire every page request and wait until all of them are back
        let results = join_all(requests).await;
        stats.directory_pages = results.len();

        // Results come back in page order, so "first sighting" means the
        // lowest page, top row.
        let mut registry = SuspectRegistry::new();
        for (url, result) in results {
            match result {
                Ok(suspects) => {
                    for sighting in suspects {
                        registry.record(sighting);
                    }
                }
                Err(e) => {
                    // A failed page just contributes no suspects
                    warn!(%url, error = %e, "directory page failed");
                    stats.directory_failures += 1;
                }
            }
        }

        registry
    }

    // Stage 2: suspect homepages -> candidate posts
    async fn collect_posts(&self, registry: &mut SuspectRegistry, stats: &mut CrawlStats) {
        // Copy the aliases out so the registry is free to be mutated later
        let aliases: Vec<String> = registry.iter().map(|blog| blog.alias.clone()).collect();

        let requests = aliases.into_iter().enumerate().map(|(index, alias)| {
            let url = self.profile.blog_url(&alias);
            async move {
                info!(%url, "searching blog");
                let result = fetch_throttled(self.source, &url, index, self.settings.page_interval)
                    .await
                    .map(|body| extract_candidate_posts(&body, self.profile));
                (alias, url, result)
            }
        });

        let results = join_all(requests).await;
        stats.homepages = results.len();

        for (alias, url, result) in results {
            match result {
                Ok(posts) => {
                    // The sidebar may link stories of other blogs; their
                    // comments must not be counted against this one
                    let (own, foreign): (Vec<String>, Vec<String>) =
                        posts.into_iter().partition(|uri| {
                            self.profile.alias_of(uri).as_deref() == Some(alias.as_str())
                        });
                    if !foreign.is_empty() {
                        debug!(%alias, skipped = foreign.len(), "ignoring posts of other blogs");
                    }

                    if let Some(blog) = registry.get_mut(&alias) {
                        blog.add_posts(own);
                        stats.posts += blog.posts.len();
                    }
                }
                Err(e) => {
                    warn!(%url, error = %e, "blog homepage failed");
                    stats.homepage_failures += 1;
                }
            }
        }
    }

    // Stage 3: candidate posts -> comment totals and spam links
    async fn inspect_posts(&self, registry: &mut SuspectRegistry, stats: &mut CrawlStats) {
        // One running index across all blogs keeps the whole stage evenly spaced
        let jobs: Vec<(String, String)> = registry
            .iter()
            .flat_map(|blog| {
                blog.posts
                    .iter()
                    .map(move |post| (blog.alias.clone(), post.uri.clone()))
            })
            .collect();

        let requests = jobs.into_iter().enumerate().map(|(index, (alias, uri))| async move {
            // Fetch, then turn the page straight into a spam verdict
            let result = fetch_throttled(self.source, &uri, index, self.settings.post_interval)
                .await
                .map(|body| {
                    let authors = extract_comment_authors(&body, self.profile);
                    classify(&uri, &authors, self.whitelist)
                });
            (alias, uri, result)
        });

        for (alias, uri, result) in join_all(requests).await {
            match result {
                Ok(scan) => {
                    // Totals, spammed flag and spam links all go to the owning blog
                    let Some(blog) = registry.get_mut(&alias) else {
                        continue;
                    };
                    if !blog.absorb(scan) {
                        warn!(post = %uri, %alias, "post not found among candidates");
                    }
                }
                Err(e) => {
                    warn!(url = %uri, error = %e, "comment page failed");
                    stats.post_failures += 1;
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is join_all?
//    - Takes many futures and returns one future that finishes when ALL of
//      them have finished
//    - The results come back in the same order the futures went in
//    - Like Promise.all() in JavaScript, except a failure does not abort the
//      others (each of our futures returns its own Result)
//
// 2. Why `async move` inside .map()?
//    - Each request needs its own copy of the url/alias it works on
//    - `move` hands those values to the future
//    - `self` is only a reference (&Pipeline), so moving it just copies the
//      pointer
//
// 3. Why merge AFTER join_all instead of inside the futures?
//    - The futures would all need &mut registry at the same time
//    - Rust forbids two mutable borrows of the same value
//    - Collecting results first and merging in one loop keeps ownership simple
//
// 4. What is let-else?
//    - `let Some(x) = opt else { continue; };`
//    - Binds x when the pattern matches, otherwise runs the else block
//    - The else block must leave the current scope (return, continue, break)
// -----------------------------------------------------------------------------
