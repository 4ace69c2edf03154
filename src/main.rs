// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the whitelist and the report template (missing files are fatal)
// 3. Crawl: directory -> abandoned blogs -> their posts -> their comments
// 4. Render the HTML report and print a summary
// 5. Exit with proper code (0 = report written, 1 = error)
//
// Rust concepts used:
// - async/await: many network requests run concurrently
// - Result<T, E> with anyhow: errors carry context up to main
// - tracing: log lines with structured fields, filtered by RUST_LOG
// =============================================================================

// Module declarations - tells Rust about our other source files
mod blog;      // src/blog.rs - suspect blogs and the registry
mod cli;       // src/cli.rs - command-line parsing
mod crawl;     // src/crawl/ - fetching and the crawl pipeline
mod extract;   // src/extract/ - reading fields out of HTML pages
mod report;    // src/report/ - view model, template engine, output
mod site;      // src/site.rs - platform URLs and selectors
mod whitelist; // src/whitelist.rs - spam classification

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use crawl::{CrawlSettings, HttpSource, Pipeline};
use report::{build_view, write_report, ReportParams, ReportView, Template};
use site::SiteProfile;
use whitelist::Whitelist;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that --json output on stdout stays machine-readable
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Both inputs are read before the first request goes out
    let whitelist = Whitelist::load(&cli.whitelist).await?;
    if whitelist.is_empty() {
        warn!(path = %cli.whitelist.display(), "whitelist is empty, every guest link counts as spam");
    } else {
        info!(entries = whitelist.len(), path = %cli.whitelist.display(), "whitelist loaded");
    }
    let template = Template::load(&cli.template).await?;

    let profile = SiteProfile::twoday()?;
    let source = HttpSource::new().context("failed to build HTTP client")?;

    info!(
        pages = cli.pages,
        abandoned = cli.abandoned,
        minspam = cli.minspam,
        "starting analysis"
    );

    let settings = CrawlSettings {
        pages: cli.pages,
        abandoned_days: cli.abandoned,
        ..CrawlSettings::default()
    };
    let outcome = Pipeline::new(&source, &profile, &whitelist, settings).run().await;

    if outcome.registry.is_empty() {
        warn!("no abandoned blogs found in the directory");
    }

    let params = ReportParams {
        pages: cli.pages,
        abandoned_days: cli.abandoned,
        min_spam: cli.minspam,
    };
    let today = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let view = build_view(&outcome.registry, &profile, params, today);

    info!("rendering report");
    let html = template.render(&view)?;
    write_report(&cli.output, &html).await?;

    print_results(&view, cli.json)?;

    info!(
        suspects = view.suspect_blog_count,
        spam_blogs = view.spam_blog_count,
        failed_requests = outcome.stats.directory_failures
            + outcome.stats.homepage_failures
            + outcome.stats.post_failures,
        output = %cli.output.display(),
        "analysis complete"
    );

    Ok(())
}

// Prints the listed blogs either as a table or JSON
fn print_results(view: &ReportView, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(view)?;
        println!("{}", json_output);
    } else {
        print_table(view);
    }
    Ok(())
}

// Prints the listed blogs as a human-readable table in the terminal
fn print_table(view: &ReportView) {
    println!("{:<30} {:>10} {:>8} {:>10} {:>10}", "BLOG", "IDLE DAYS", "POSTS", "SPAM", "DIRTINESS");
    println!("{}", "=".repeat(72));

    for blog in &view.spam_blogs {
        // Truncate long aliases for display
        let alias = if blog.alias.chars().count() > 28 {
            format!("{}..", blog.alias.chars().take(28).collect::<String>())
        } else {
            blog.alias.clone()
        };

        println!(
            "{:<30} {:>10} {:>8} {:>10} {:>9}%",
            alias, blog.last_post_published, blog.analyzed_posts, blog.spam_comments, blog.dirtiness
        );
    }

    println!();
    println!("Summary:");
    println!("   Abandoned blogs found: {}", view.suspect_blog_count);
    println!("   Listed as spam blogs:  {}", view.spam_blog_count);
}
