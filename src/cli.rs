// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: one run = one crawl + one report. The three
// tuning flags keep the short forms they have always had (-p, -a, -m); the
// file locations have long forms only.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the whole argument parser
// - PathBuf: an owned filesystem path
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "spamblog-finder",
    version,
    about = "Finds abandoned twoday.net blogs that collect guest comment spam",
    long_about = "spamblog-finder scans the twoday.net blog directory for blogs without \
                  recent posts, inspects the comments on their recent stories, and writes \
                  an HTML report of the blogs that collect the most guest spam."
)]
pub struct Cli {
    /// Number of directory pages to analyze (15 blogs per page)
    #[arg(short, long, default_value_t = 10)]
    pub pages: usize,

    /// Days without a new post after which a blog counts as abandoned
    #[arg(short, long, default_value_t = 365)]
    pub abandoned: u32,

    /// Minimum number of spam comments for a blog to be listed
    #[arg(short, long, default_value_t = 15)]
    pub minspam: u32,

    /// Whitelist file: one trusted link substring per line
    #[arg(long, default_value = "whitelist.txt")]
    pub whitelist: PathBuf,

    /// HTML template of the report
    #[arg(long, default_value = "html/spamMain.html")]
    pub template: PathBuf,

    /// Where to write the report
    #[arg(short, long, default_value = "spam_blogs.html")]
    pub output: PathBuf,

    /// Print the report data as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. How do the doc comments (///) show up?
//    - clap turns them into the help text of each flag
//    - Run with --help to see them
//
// 2. What do short and long do?
//    - #[arg(short, long)] on `pages` creates both -p and --pages
//    - The short flag is the first letter of the field name
//
// 3. default_value_t vs default_value?
//    - default_value_t takes a typed Rust value (10, 365, ...)
//    - default_value takes a string that clap parses (used for paths)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["spamblog-finder"]).unwrap();
        assert_eq!(cli.pages, 10);
        assert_eq!(cli.abandoned, 365);
        assert_eq!(cli.minspam, 15);
        assert_eq!(cli.whitelist, PathBuf::from("whitelist.txt"));
        assert_eq!(cli.template, PathBuf::from("html/spamMain.html"));
        assert_eq!(cli.output, PathBuf::from("spam_blogs.html"));
        assert!(!cli.json);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["spamblog-finder", "-p", "20", "-a", "730", "-m", "5"]).unwrap();
        assert_eq!(cli.pages, 20);
        assert_eq!(cli.abandoned, 730);
        assert_eq!(cli.minspam, 5);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "spamblog-finder",
            "--pages=3",
            "--abandoned=100",
            "--minspam=1",
            "--output",
            "out.html",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.pages, 3);
        assert_eq!(cli.abandoned, 100);
        assert_eq!(cli.minspam, 1);
        assert_eq!(cli.output, PathBuf::from("out.html"));
        assert!(cli.json);
    }

    #[test]
    fn test_rejects_non_numeric_pages() {
        assert!(Cli::try_parse_from(["spamblog-finder", "-p", "many"]).is_err());
    }
}
