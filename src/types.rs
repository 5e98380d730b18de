//! Shared types used across pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → generate)
//! and must be identical on both sides of the manifest.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One authored article: header metadata plus the markdown body.
///
/// Title and publication date are always present once a `Post` exists;
/// the scan stage refuses to build one without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL slug (file stem), unique across the site
    pub slug: String,
    /// Source file relative to the posts directory
    pub source_path: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub pub_date: NaiveDate,
    /// Hero image reference, kept exactly as authored (`imgSrc`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_alt: Option<String>,
    /// Layout path from the header, preserved verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Raw markdown body (header and MDX wiring removed)
    pub body: String,
}

impl Post {
    /// Site-relative URL of the rendered post page.
    pub fn url(&self) -> String {
        format!("/posts/{}/", self.slug)
    }
}

/// A single site-wide navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavEntry {
    pub label: String,
    pub href: String,
}

impl NavEntry {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }

    /// Internal targets are site-absolute paths; everything else leaves the site.
    pub fn is_external(&self) -> bool {
        is_external_href(&self.href)
    }
}

/// A social profile link shown in the hero banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    /// Icon image reference; the label is shown instead when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub href: String,
}

impl SocialLink {
    pub fn new(label: &str, icon: Option<&str>, href: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.map(str::to_string),
            href: href.to_string(),
        }
    }
}

/// True for references that point off-site (`http(s)://`, `mailto:`).
pub fn is_external_href(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_url_uses_slug() {
        let post = Post {
            slug: "scala-101".to_string(),
            source_path: "scala-101.md".to_string(),
            title: "Scala 101".to_string(),
            description: String::new(),
            pub_date: NaiveDate::from_ymd_opt(2024, 2, 18).unwrap(),
            img_src: None,
            img_alt: None,
            layout: None,
            body: String::new(),
        };
        assert_eq!(post.url(), "/posts/scala-101/");
    }

    #[test]
    fn external_detection() {
        assert!(NavEntry::new("GitHub", "https://github.com/someone").is_external());
        assert!(NavEntry::new("Mail", "mailto:me@example.com").is_external());
        assert!(!NavEntry::new("Blog", "/posts/").is_external());
    }
}
