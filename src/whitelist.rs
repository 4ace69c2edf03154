// src/whitelist.rs
// =============================================================================
// This module decides which comments count as spam.
//
// A comment is spam when:
// 1. its author is a guest (name ends in "(Gast)" or "(guest)"), AND
// 2. the author's link does not contain any whitelisted substring
//
// The whitelist is a plain text file with one substring per line, for example
// the homepages of regular guest commenters.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

use crate::extract::CommentAuthor;

// Markers the platform appends to the names of unregistered commenters
const GUEST_MARKERS: [&str; 2] = ["(gast)", "(guest)"];

// An ordered list of substrings that make an author link trustworthy
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    entries: Vec<String>,
}

impl Whitelist {
    // Builds a whitelist from file contents
    //
    // Lines are trimmed (so "\r\n" line endings work) and blank lines are
    // skipped; a blank entry would otherwise match every link.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self { entries }
    }

    // Reads and parses a whitelist file
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read whitelist {}", path.display()))?;

        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // True when any entry occurs somewhere in `href`
    pub fn permits(&self, href: &str) -> bool {
        self.entries.iter().any(|entry| href.contains(entry.as_str()))
    }
}

// True when the displayed name marks an unregistered commenter
pub fn is_guest_author(name: &str) -> bool {
    let name = name.to_lowercase();
    GUEST_MARKERS.iter().any(|marker| name.contains(marker))
}

// Spam verdict for the comments of a single post page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentScan {
    /// Comment page that was inspected
    pub post: String,
    /// Every comment on the page, spam or not
    pub total_comments: u32,
    /// One "<href> (<name>)" entry per spam comment
    pub spam_links: Vec<String>,
}

// Counts the comments of a post and collects the spam ones
pub fn classify(post: &str, authors: &[CommentAuthor], whitelist: &Whitelist) -> CommentScan {
    let spam_links = authors
        .iter()
        .filter(|author| is_guest_author(&author.name) && !whitelist.permits(&author.href))
        .map(|author| format!("{} ({})", author.href, author.name))
        .collect();

    CommentScan {
        post: post.to_string(),
        total_comments: authors.len() as u32,
        spam_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(href: &str, name: &str) -> CommentAuthor {
        CommentAuthor {
            href: href.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let whitelist = Whitelist::parse("friend.example\r\n\r\n  other.example  \n");
        assert_eq!(whitelist.len(), 2);
        assert!(whitelist.permits("http://friend.example/blog"));
        assert!(whitelist.permits("https://other.example"));
        assert!(!whitelist.permits("http://pills.example"));
    }

    #[test]
    fn test_empty_whitelist_permits_nothing() {
        let whitelist = Whitelist::parse("\n\n");
        assert!(whitelist.is_empty());
        assert!(!whitelist.permits("http://anything.example"));
        assert!(!whitelist.permits(""));
    }

    #[test]
    fn test_is_guest_author() {
        assert!(is_guest_author("cheap pills (Gast)"));
        assert!(is_guest_author("Viagra (GUEST)"));
        assert!(!is_guest_author("regular user"));
        assert!(!is_guest_author("gast"));
    }

    #[test]
    fn test_classify() {
        let authors = vec![
            author("http://friend.twoday.net/", "friend"),
            author("http://pills.example/", "pills (Gast)"),
            author("http://neighbour.example/", "Nachbar (Gast)"),
            author("http://pills.example/", "pills (Gast)"),
        ];
        let whitelist = Whitelist::parse("neighbour.example");

        let scan = classify("http://dusty.twoday.net/stories/1/#comments", &authors, &whitelist);
        assert_eq!(scan.total_comments, 4);
        assert_eq!(
            scan.spam_links,
            vec![
                "http://pills.example/ (pills (Gast))".to_string(),
                "http://pills.example/ (pills (Gast))".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_whitelist_never_lowers_spam_count() {
        let authors = vec![
            author("http://a.example/", "a (Gast)"),
            author("http://b.example/", "b (guest)"),
            author("http://c.example/", "c"),
        ];
        let full = classify("p", &authors, &Whitelist::parse("a.example\nc.example"));
        let empty = classify("p", &authors, &Whitelist::default());

        assert!(empty.spam_links.len() >= full.spam_links.len());
        assert_eq!(empty.spam_links.len(), 2);
        assert_eq!(full.spam_links.len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whitelist.txt");
        std::fs::write(&path, "friend.example\n").unwrap();

        let whitelist = Whitelist::load(&path).await.unwrap();
        assert!(whitelist.permits("http://friend.example/"));
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Whitelist::load(&dir.path().join("missing.txt")).await.unwrap_err();
        assert!(err.to_string().contains("failed to read whitelist"));
    }
}
