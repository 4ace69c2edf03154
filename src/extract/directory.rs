// src/extract/directory.rs
// =============================================================================
// Directory ("blogroll") extraction profile.
//
// A directory page is a table of recently touched stories. Each story link is
// followed by an element with text like "vor 412 Tagen" ("412 days ago"),
// which tells us how long the blog has been quiet.
//
// A blog with several stories on the same page shows up in consecutive rows,
// so we only look at the first row of every run of the same alias.
// =============================================================================

use scraper::{ElementRef, Html};

use super::leading_number;
use crate::site::SiteProfile;

// A blog seen in the directory that has been idle long enough to be a suspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    pub alias: String,
    pub days_since_last_post: u32,
}

// Extracts suspects from one directory page
//
// Parameters:
//   html: the directory page body
//   profile: platform selectors and URL rules
//   min_days: a blog must be idle for MORE than this many days
//
// Rows whose "days ago" text is missing or unreadable are not suspects.
pub fn extract_suspects(html: &str, profile: &SiteProfile, min_days: u32) -> Vec<Sighting> {
    let document = Html::parse_document(html);
    let mut suspects = Vec::new();
    let mut last_alias: Option<String> = None;

    for link in document.select(&profile.selectors().directory_link) {
        let Some(alias) = link
            .value()
            .attr("href")
            .and_then(|href| profile.alias_of(href))
        else {
            continue;
        };

        if last_alias.as_deref() == Some(alias.as_str()) {
            continue;
        }
        last_alias = Some(alias.clone());

        let days = link
            .next_siblings()
            .find_map(ElementRef::wrap)
            .and_then(|sibling| days_ago(&sibling.text().collect::<String>(), profile.days_marker()));

        match days {
            Some(days) if days > min_days => suspects.push(Sighting {
                alias,
                days_since_last_post: days,
            }),
            _ => {}
        }
    }

    suspects
}

// "zuletzt vor 400 Tagen" -> Some(400)
fn days_ago(text: &str, marker: &str) -> Option<u32> {
    let (_, rest) = text.split_once(marker)?;
    leading_number(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(alias: &str, story: u32, age: &str) -> String {
        format!(
            r#"<tr><td><a href="http://{alias}.twoday.net/stories/{story}/">Story</a> <span>{age}</span></td></tr>"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!("<html><body><table>{}</table></body></html>", rows.concat())
    }

    #[test]
    fn test_old_blog_is_suspect() {
        let html = page(&[row("dusty", 1, "vor 400 Tagen")]);
        let profile = SiteProfile::twoday().unwrap();

        let suspects = extract_suspects(&html, &profile, 365);
        assert_eq!(
            suspects,
            vec![Sighting { alias: "dusty".to_string(), days_since_last_post: 400 }]
        );
    }

    #[test]
    fn test_recent_blog_is_not_suspect() {
        let html = page(&[row("busy", 1, "vor 3 Tagen"), row("edge", 2, "vor 365 Tagen")]);
        let profile = SiteProfile::twoday().unwrap();

        assert!(extract_suspects(&html, &profile, 365).is_empty());
    }

    #[test]
    fn test_consecutive_rows_of_same_blog_count_once() {
        let html = page(&[
            row("dusty", 1, "vor 400 Tagen"),
            row("dusty", 2, "vor 900 Tagen"),
            row("other", 3, "vor 500 Tagen"),
            row("dusty", 4, "vor 700 Tagen"),
        ]);
        let profile = SiteProfile::twoday().unwrap();

        let aliases: Vec<_> = extract_suspects(&html, &profile, 365)
            .into_iter()
            .map(|s| (s.alias, s.days_since_last_post))
            .collect();
        assert_eq!(
            aliases,
            vec![
                ("dusty".to_string(), 400),
                ("other".to_string(), 500),
                ("dusty".to_string(), 700),
            ]
        );
    }

    #[test]
    fn test_missing_age_is_not_suspect() {
        let html = page(&[
            r#"<tr><td><a href="http://noage.twoday.net/stories/1/">Story</a></td></tr>"#.to_string(),
            row("garbled", 2, "gestern"),
        ]);
        let profile = SiteProfile::twoday().unwrap();

        assert!(extract_suspects(&html, &profile, 0).is_empty());
    }

    #[test]
    fn test_links_outside_table_are_ignored() {
        let html = r#"<div><a href="http://dusty.twoday.net/stories/1/">x</a><span>vor 999 Tagen</span></div>"#;
        let profile = SiteProfile::twoday().unwrap();

        assert!(extract_suspects(html, &profile, 365).is_empty());
    }
}
