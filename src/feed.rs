//! RSS 2.0 feed at `/rss.xml`.
//!
//! Items follow manifest order (newest first). `lastBuildDate` is the newest
//! post's date so the feed only changes when content does.

use crate::scan::Manifest;
use chrono::{NaiveDate, NaiveTime};
use maud::{PreEscaped, html};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// RFC 822 date at midnight UTC, fixed width (`Tue, 02 Apr 2024 00:00:00 +0000`).
fn rfc2822(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .format("%a, %d %b %Y %H:%M:%S +0000")
        .to_string()
}

pub fn render_feed(manifest: &Manifest) -> String {
    let site = &manifest.config.site;
    let last_build = manifest.posts.first().map(|p| rfc2822(p.pub_date));
    // Without a base URL links are site-relative and not valid permalinks.
    let permalink = if site.base_url.is_empty() { "false" } else { "true" };

    let feed = html! {
        (PreEscaped(XML_DECLARATION))
        rss version="2.0" {
            channel {
                title { (site.title) }
                link { (site.absolute_url("/")) }
                description { (site.description) }
                language { (site.lang) }
                @if let Some(date) = &last_build {
                    lastBuildDate { (date) }
                }
                @for post in &manifest.posts {
                    @let url = site.absolute_url(&post.url());
                    item {
                        title { (post.title) }
                        link { (url) }
                        guid isPermaLink=(permalink) { (url) }
                        @if !post.description.is_empty() {
                            description { (post.description) }
                        }
                        pubDate { (rfc2822(post.pub_date)) }
                    }
                }
            }
        }
    };
    feed.into_string()
}
