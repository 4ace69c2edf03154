// src/extract/blog.rs
// =============================================================================
// Blog homepage extraction profile.
//
// A suspect blog's homepage tells us which posts are worth inspecting:
// 1. Front page posts whose "N Kommentare" link shows at least one comment
// 2. Posts listed in the "recent activity" sidebar (history items); these
//    recently received a comment, so spam is likely to sit there
//
// Both lists point at a post's comment section ("...#comments").
// =============================================================================

use scraper::Html;
use std::collections::HashSet;

use super::leading_number;
use crate::site::SiteProfile;

// Extracts the comment-page URLs of posts worth inspecting
//
// Returns front page posts first, then history items; a URL never appears
// twice.
pub fn extract_candidate_posts(html: &str, profile: &SiteProfile) -> Vec<String> {
    let document = Html::parse_document(html);
    let selectors = profile.selectors();

    let front_posts = document
        .select(&selectors.front_comment_link)
        .filter(|link| {
            let count = leading_number(&link.text().collect::<String>());
            matches!(count, Some(n) if n > 0)
        })
        .filter_map(|link| link.value().attr("href"))
        .map(str::to_string);

    let history_posts = document
        .select(&selectors.history_link)
        .filter_map(|link| link.value().attr("href"))
        .map(comments_anchor);

    let mut seen = HashSet::new();
    front_posts
        .chain(history_posts)
        .filter(|uri| seen.insert(uri.clone()))
        .collect()
}

// Points a story URL at its comment section
//
// "http://a.twoday.net/stories/1/#c42" -> "http://a.twoday.net/stories/1/#comments"
fn comments_anchor(href: &str) -> String {
    let story = href.split('#').next().unwrap_or(href);
    format!("{}#comments", story)
}
