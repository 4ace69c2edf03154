// src/extract/mod.rs
// =============================================================================
// This module turns raw HTML pages into structured records.
//
// There is one extraction profile per kind of page we crawl:
// - directory: the platform's blogroll -> suspect blogs (alias + days idle)
// - blog: a blog homepage -> posts that have comments
// - comments: a post page -> the author of every comment
//
// The CSS selectors come from the SiteProfile, so these functions only know
// *how* to read a page, not *which* platform it belongs to.
//
// Rust concepts:
// - Submodules and `pub use` re-exports (same layout as the other modules)
// - scraper::ElementRef for walking from one element to its siblings
// =============================================================================

mod blog;
mod comments;
mod directory;

pub use blog::extract_candidate_posts;
pub use comments::{extract_comment_authors, CommentAuthor};
pub use directory::{extract_suspects, Sighting};

// Parses the integer at the start of a piece of text
//
// Leading whitespace is skipped and everything after the digits is ignored,
// so "  12 Kommentare" gives Some(12) and "Kommentare" gives None.
pub(crate) fn leading_number(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12 Kommentare"), Some(12));
        assert_eq!(leading_number("  400 Tagen"), Some(400));
        assert_eq!(leading_number("7"), Some(7));
    }

    #[test]
    fn test_leading_number_without_digits() {
        assert_eq!(leading_number("Kommentare"), None);
        assert_eq!(leading_number(""), None);
        assert_eq!(leading_number("-3 comments"), None);
    }
}
