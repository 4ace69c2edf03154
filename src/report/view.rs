// src/report/view.rs
// =============================================================================
// Builds the data the report template is filled with.
//
// The crawl produces raw counts; the report shows derived values:
// - how long a blog has been quiet, as "(~ 2 years, 3 months)"
// - dirtiness: the share of analyzed comments that are spam, in percent
// - which posts carry spam
//
// Field names are camelCase because that is what the template uses.
// =============================================================================

use serde::Serialize;

use crate::blog::{SuspectBlog, SuspectRegistry};
use crate::site::SiteProfile;

// Run parameters echoed at the top of the report
#[derive(Debug, Clone, Copy)]
pub struct ReportParams {
    pub pages: usize,
    pub abandoned_days: u32,
    pub min_spam: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub today: String,
    pub max_analyze_pages: usize,
    pub days_blog_qualifies_as_abandoned: u32,
    pub minimum_spam_comments_to_qualify: u32,
    pub suspect_blog_count: usize,
    pub spam_blog_count: usize,
    pub spam_blogs: Vec<SpamBlogView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamBlogView {
    pub alias: String,
    pub blog_url: String,
    pub last_post_published: u32,
    pub time_passed: String,
    pub analyzed_posts: usize,
    pub analyzed_comments: u32,
    pub spammed_posts: usize,
    pub spammed_posts_percent: u32,
    pub spam_comments: u32,
    pub dirtiness: u32,
    pub dirty_posts: Vec<String>,
    pub spam_links: Vec<String>,
}

// Builds the report view; blogs below `params.min_spam` are left out
pub fn build_view(
    registry: &SuspectRegistry,
    profile: &SiteProfile,
    params: ReportParams,
    today: String,
) -> ReportView {
    let spam_blogs: Vec<SpamBlogView> = registry
        .qualifying(params.min_spam)
        .map(|blog| blog_view(blog, profile))
        .collect();

    ReportView {
        today,
        max_analyze_pages: params.pages,
        days_blog_qualifies_as_abandoned: params.abandoned_days,
        minimum_spam_comments_to_qualify: params.min_spam,
        suspect_blog_count: registry.len(),
        spam_blog_count: spam_blogs.len(),
        spam_blogs,
    }
}

fn blog_view(blog: &SuspectBlog, profile: &SiteProfile) -> SpamBlogView {
    let dirty_posts: Vec<String> = blog.spammed_posts().map(|post| post.uri.clone()).collect();

    SpamBlogView {
        alias: blog.alias.clone(),
        blog_url: profile.blog_url(&blog.alias),
        last_post_published: blog.days_since_last_post,
        time_passed: time_passed(blog.days_since_last_post),
        analyzed_posts: blog.posts.len(),
        analyzed_comments: blog.analyzed_comments,
        spammed_posts: dirty_posts.len(),
        spammed_posts_percent: percentage(dirty_posts.len() as u32, blog.posts.len() as u32),
        spam_comments: blog.spam_comments,
        dirtiness: percentage(blog.spam_comments, blog.analyzed_comments),
        dirty_posts,
        spam_links: blog.spam_links.clone(),
    }
}

// Splits a day count into whole years and rounded remaining months
//
// A remainder that rounds up to 12 months counts as one more year.
pub fn elapsed(days: u32) -> (u32, u32) {
    let mut years = days / 365;
    let fraction = f64::from(days) / 365.0 - f64::from(years);
    let mut months = (fraction * 12.0).round() as u32;

    if months == 12 {
        years += 1;
        months = 0;
    }

    (years, months)
}

// 400 -> "(~ 1 year, 1 month)"
pub fn time_passed(days: u32) -> String {
    let (years, months) = elapsed(days);
    format!(
        "(~ {} {}, {} {})",
        years,
        plural(years, "year", "years"),
        months,
        plural(months, "month", "months")
    )
}

// round(part / whole × 100), and 0 when there is nothing to divide by
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}

fn plural<'a>(n: u32, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}
