// src/extract/comments.rs
// =============================================================================
// Comment page extraction profile.
//
// Every comment on a post page carries a date line with a link to its author:
// registered users link to their own blog, guests link to whatever homepage
// they typed in and get "(Gast)" / "(guest)" appended to their name.
// =============================================================================

use scraper::Html;

use crate::site::SiteProfile;

// The author link of one comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAuthor {
    /// Where the author's name links to ("" when the anchor has no href)
    pub href: String,
    /// Displayed author name, e.g. "cheap-pills (Gast)"
    pub name: String,
}

// Extracts the author of every comment on a post page, in page order
pub fn extract_comment_authors(html: &str, profile: &SiteProfile) -> Vec<CommentAuthor> {
    let document = Html::parse_document(html);

    document
        .select(&profile.selectors().comment_author)
        .map(|link| CommentAuthor {
            href: link.value().attr("href").unwrap_or_default().to_string(),
            name: link.text().collect::<String>().trim().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_authors() {
        let html = r#"
            <div class="comment">
              <div class="commentDate"><a href="http://friend.twoday.net/">friend</a> - 1. Jan, 10:00</div>
            </div>
            <div class="comment">
              <div class="commentDate"><a href="http://pills.example/">cheap pills (Gast)</a> - 2. Jan</div>
            </div>
            <div class="comment">
              <div class="commentDate"><span><a href="http://nested.example/">nested</a></span></div>
            </div>
            <div class="comment">
              <div class="commentDate"><a>anonymous (guest)</a></div>
            </div>
        "#;
        let profile = SiteProfile::twoday().unwrap();

        let authors = extract_comment_authors(html, &profile);
        assert_eq!(
            authors,
            vec![
                CommentAuthor {
                    href: "http://friend.twoday.net/".to_string(),
                    name: "friend".to_string(),
                },
                CommentAuthor {
                    href: "http://pills.example/".to_string(),
                    name: "cheap pills (Gast)".to_string(),
                },
                CommentAuthor {
                    href: String::new(),
                    name: "anonymous (guest)".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_page_without_comments() {
        let profile = SiteProfile::twoday().unwrap();
        assert!(extract_comment_authors("<p>Keine Kommentare</p>", &profile).is_empty());
    }
}
