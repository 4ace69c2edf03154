// src/blog.rs
// =============================================================================
// The aggregate every crawl stage writes into.
//
// A SuspectBlog is created the first time its alias shows up in the
// directory and is then only ever grown:
// - the homepage stage appends candidate posts
// - the comment stage adds comment totals, marks posts as spammed and adds
//   spam links
// Nothing is ever removed or decreased, and duplicates are dropped on insert.
//
// Rust concepts:
// - BTreeMap: a map that iterates in key order (the report is sorted by alias)
// - Entry API: insert-if-absent in one lookup
// =============================================================================

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::extract::Sighting;
use crate::whitelist::CommentScan;

// A post whose comments get inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePost {
    pub uri: String,
    pub spammed: bool,
}

// Everything we learned about one abandoned blog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspectBlog {
    pub alias: String,
    pub days_since_last_post: u32,
    pub posts: Vec<CandidatePost>,
    pub analyzed_comments: u32,
    pub spam_comments: u32,
    pub spam_links: Vec<String>,
}

impl SuspectBlog {
    pub fn new(alias: &str, days_since_last_post: u32) -> Self {
        Self {
            alias: alias.to_string(),
            days_since_last_post,
            posts: Vec::new(),
            analyzed_comments: 0,
            spam_comments: 0,
            spam_links: Vec::new(),
        }
    }

    // Appends posts not already known (by URI)
    pub fn add_posts<I>(&mut self, uris: I)
    where
        I: IntoIterator<Item = String>,
    {
        for uri in uris {
            if !self.posts.iter().any(|post| post.uri == uri) {
                self.posts.push(CandidatePost { uri, spammed: false });
            }
        }
    }

    // Folds the result of one comment page into the totals
    //
    // Returns false when the scanned post is not one of this blog's posts;
    // the counts are still added in that case.
    pub fn absorb(&mut self, scan: CommentScan) -> bool {
        // Totals only ever grow
        self.analyzed_comments += scan.total_comments;
        self.spam_comments += scan.spam_links.len() as u32;

        // Flag the post itself; once spammed it stays spammed
        let known = match self.posts.iter_mut().find(|post| post.uri == scan.post) {
            Some(post) => {
                post.spammed |= !scan.spam_links.is_empty();
                true
            }
            None => false,
        };

        // Keep the first occurrence of every spam link, in arrival order
        for link in scan.spam_links {
            if !self.spam_links.contains(&link) {
                self.spam_links.push(link);
            }
        }

        known
    }

    pub fn spammed_posts(&self) -> impl Iterator<Item = &CandidatePost> {
        self.posts.iter().filter(|post| post.spammed)
    }
}

// All suspects of a run, keyed by alias
#[derive(Debug, Clone, Default)]
pub struct SuspectRegistry {
    blogs: BTreeMap<String, SuspectBlog>,
}

impl SuspectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Registers a directory sighting; the first sighting of an alias wins
    //
    // Returns true when the alias was new.
    pub fn record(&mut self, sighting: Sighting) -> bool {
        match self.blogs.entry(sighting.alias) {
            Entry::Vacant(slot) => {
                let blog = SuspectBlog::new(slot.key(), sighting.days_since_last_post);
                slot.insert(blog);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, alias: &str) -> Option<&SuspectBlog> {
        self.blogs.get(alias)
    }

    pub fn get_mut(&mut self, alias: &str) -> Option<&mut SuspectBlog> {
        self.blogs.get_mut(alias)
    }

    pub fn len(&self) -> usize {
        self.blogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blogs.is_empty()
    }

    // Blogs in alias order
    pub fn iter(&self) -> impl Iterator<Item = &SuspectBlog> {
        self.blogs.values()
    }

    // Blogs with at least `min_spam` spam comments, in alias order
    pub fn qualifying(&self, min_spam: u32) -> impl Iterator<Item = &SuspectBlog> {
        self.blogs
            .values()
            .filter(move |blog| blog.spam_comments >= min_spam)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is the Entry API?
//    - map.entry(key) looks the key up once and tells you if it is there
//    - Vacant: insert a new value; Occupied: leave the existing one alone
//    - Avoids a contains_key() + insert() double lookup
//
// 2. Why return `impl Iterator` from qualifying()?
//    - The caller can loop over it or collect it, without us building a Vec
//    - `move` in the closure copies min_spam into the iterator
//
// 3. What does `|=` do on a bool?
//    - `a |= b` is `a = a | b`: once true, it stays true
// -----------------------------------------------------------------------------
