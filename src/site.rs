// src/site.rs
// =============================================================================
// This module describes the blog platform we crawl.
//
// Everything that is specific to twoday.net lives here:
// - Where the paginated directory ("blogroll") is and how it pages
// - How a blog alias maps to its homepage URL (and back)
// - The CSS selectors each extraction profile uses
//
// The rest of the crate only talks to a SiteProfile, so pointing the tool at
// a different (but similarly structured) platform means changing these values.
//
// Rust concepts:
// - Default trait: a "factory" for the twoday.net settings
// - thiserror: deriving a typed error enum
// - Compiling selectors once and reusing them for every page
// =============================================================================

use scraper::Selector;
use thiserror::Error;
use url::Url;

// Errors raised while building a SiteProfile
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid CSS selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

// Plain settings for a platform, before selectors are compiled
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Directory URL prefix; the page offset is appended to it
    pub directory_url: String,
    /// How many directory entries a single directory page shows
    pub directory_stride: usize,
    /// Scheme used for blog homepages
    pub scheme: String,
    /// Host domain under which every blog has its own subdomain
    pub domain: String,
    /// Text that precedes the "days since last post" number
    pub days_marker: String,
    /// Story links inside the directory table
    pub directory_link: String,
    /// Front page "N comments" links
    pub front_comment_link: String,
    /// Story links in the "recent activity" sidebar
    pub history_link: String,
    /// Author anchors of comments on a post page
    pub comment_author: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            directory_url: "http://twoday.net/main?start=".to_string(),
            directory_stride: 15,
            scheme: "http".to_string(),
            domain: "twoday.net".to_string(),
            days_marker: "vor ".to_string(),
            directory_link: "td a[href*='.twoday.net/stories/']".to_string(),
            front_comment_link: ".storyLinks a[href*='#comments']".to_string(),
            history_link: ".historyItem a[href*='.twoday.net/stories/']".to_string(),
            comment_author: ".commentDate > a".to_string(),
        }
    }
}

// Compiled selectors, one per extraction profile
#[derive(Debug)]
pub struct Selectors {
    pub directory_link: Selector,
    pub front_comment_link: Selector,
    pub history_link: Selector,
    pub comment_author: Selector,
}

// A ready-to-use platform description
#[derive(Debug)]
pub struct SiteProfile {
    settings: SiteSettings,
    selectors: Selectors,
}

impl SiteProfile {
    // Compiles the selectors of the given settings
    //
    // Fails if any selector is not valid CSS.
    pub fn new(settings: SiteSettings) -> Result<Self, ProfileError> {
        let selectors = Selectors {
            directory_link: compile(&settings.directory_link)?,
            front_comment_link: compile(&settings.front_comment_link)?,
            history_link: compile(&settings.history_link)?,
            comment_author: compile(&settings.comment_author)?,
        };
        Ok(Self { settings, selectors })
    }

    // The twoday.net profile
    pub fn twoday() -> Result<Self, ProfileError> {
        Self::new(SiteSettings::default())
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    pub fn days_marker(&self) -> &str {
        &self.settings.days_marker
    }

    // URL of directory page number `page` (0-based)
    //
    // Example: page 2 -> "http://twoday.net/main?start=30"
    pub fn directory_page_url(&self, page: usize) -> String {
        format!(
            "{}{}",
            self.settings.directory_url,
            page * self.settings.directory_stride
        )
    }

    // Homepage URL of a blog
    //
    // Example: "foo" -> "http://foo.twoday.net/"
    pub fn blog_url(&self, alias: &str) -> String {
        format!("{}://{}.{}/", self.settings.scheme, alias, self.settings.domain)
    }

    // Extracts the blog alias (subdomain) from any URL on the platform
    //
    // Returns None for URLs on other hosts, for the bare platform domain,
    // and for strings that are not URLs at all.
    pub fn alias_of(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        let alias = host.strip_suffix(self.settings.domain.as_str())?;
        let alias = alias.strip_suffix('.')?;

        if alias.is_empty() {
            None
        } else {
            Some(alias.to_string())
        }
    }
}

fn compile(css: &str) -> Result<Selector, ProfileError> {
    Selector::parse(css).map_err(|e| ProfileError::Selector {
        selector: css.to_string(),
        reason: format!("{:?}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_page_url() {
        let profile = SiteProfile::twoday().unwrap();
        assert_eq!(profile.directory_page_url(0), "http://twoday.net/main?start=0");
        assert_eq!(profile.directory_page_url(3), "http://twoday.net/main?start=45");
    }

    #[test]
    fn test_blog_url() {
        let profile = SiteProfile::twoday().unwrap();
        assert_eq!(profile.blog_url("quietplace"), "http://quietplace.twoday.net/");
    }

    #[test]
    fn test_alias_of_story_url() {
        let profile = SiteProfile::twoday().unwrap();
        let alias = profile.alias_of("http://quietplace.twoday.net/stories/1234/#comments");
        assert_eq!(alias.as_deref(), Some("quietplace"));
    }

    #[test]
    fn test_alias_of_foreign_host() {
        let profile = SiteProfile::twoday().unwrap();
        assert_eq!(profile.alias_of("http://example.com/stories/1/"), None);
        assert_eq!(profile.alias_of("http://twoday.net/main"), None);
        assert_eq!(profile.alias_of("http://nottwoday.net/"), None);
        assert_eq!(profile.alias_of("not a url"), None);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        let settings = SiteSettings {
            comment_author: "a[[".to_string(),
            ..SiteSettings::default()
        };
        let err = SiteProfile::new(settings).unwrap_err();
        assert!(err.to_string().contains("a[["));
    }
}
