// src/report/mod.rs
// =============================================================================
// This module turns a finished crawl into the static HTML report.
//
// Submodules:
// - view: derived display fields (elapsed time, percentages, filtering)
// - template: the mustache-style engine that fills the HTML template
// =============================================================================

mod template;
mod view;

pub use template::Template;
pub use view::{build_view, ReportParams, ReportView};

use anyhow::{Context, Result};
use std::path::Path;

// Writes the rendered report, replacing any previous file
pub async fn write_report(path: &Path, html: &str) -> Result<()> {
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("failed to write report {}", path.display()))
}
