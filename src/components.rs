//! Presentational components.
//!
//! Each component is a pure function from props to [`Markup`]. Parents hand
//! pre-rendered children in as `Markup` values (a logo's icon, a hero's title
//! and social buttons), so nothing here needs to know what it is wrapping.
//! Maud escapes every interpolated string.

use crate::types::{NavEntry, Post, SocialLink};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, html};

/// Display format for dates in listings and post headers.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Machine-readable `YYYY-MM-DD`.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// Document chrome
// ============================================================================

/// `<head>` metadata for a page.
#[derive(Debug, Clone, Default)]
pub struct PageHead<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub lang: &'a str,
    /// `og:image` reference, verbatim
    pub image: Option<&'a str>,
    /// Set on article pages (`article:published_time`)
    pub published: Option<NaiveDate>,
    /// Site-relative feed URL advertised via `<link rel="alternate">`
    pub feed: Option<&'a str>,
}

/// Renders the base HTML document structure.
pub fn base_document(head: &PageHead, css: &str, content: Markup) -> Markup {
    let og_type = if head.published.is_some() {
        "article"
    } else {
        "website"
    };
    html! {
        (DOCTYPE)
        html lang=(head.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (head.title) }
                meta name="description" content=(head.description);
                meta property="og:type" content=(og_type);
                meta property="og:title" content=(head.title);
                meta property="og:description" content=(head.description);
                @if let Some(image) = head.image {
                    meta property="og:image" content=(image);
                }
                @if let Some(date) = head.published {
                    meta property="article:published_time" content=(iso_date(date));
                }
                @if let Some(feed) = head.feed {
                    link rel="alternate" type="application/rss+xml" title=(head.title) href=(feed);
                }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Site footer: copyright line and feed link.
pub fn site_footer(author: &str, site_title: &str, year: Option<i32>) -> Markup {
    let owner = if author.is_empty() { site_title } else { author };
    html! {
        footer.site-footer {
            p {
                @if let Some(year) = year {
                    "© " (year) " " (owner)
                } @else {
                    "© " (owner)
                }
                " · "
                a href="/rss.xml" { "RSS" }
            }
        }
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Props for [`logo`].
pub struct LogoProps<'a> {
    pub icon: Markup,
    pub name: &'a str,
}

/// Site logo: icon next to the site name, linking home.
pub fn logo(props: LogoProps) -> Markup {
    html! {
        a.logo href="/" {
            span.logo-icon { (props.icon) }
            span.logo-name { (props.name) }
        }
    }
}

/// Icon markup for a logo given an optional image reference.
pub fn logo_icon(icon: Option<&str>) -> Markup {
    html! {
        @if let Some(src) = icon {
            img src=(src) alt="" width="32" height="32";
        }
    }
}

/// Site-wide navbar. Identical on every page: same logo, same entries,
/// same order.
pub fn navbar(logo: Markup, entries: &[NavEntry]) -> Markup {
    html! {
        header.site-header {
            nav.navbar {
                (logo)
                ul.nav-links {
                    @for entry in entries {
                        li {
                            @if entry.is_external() {
                                a href=(entry.href) target="_blank" rel="noopener" { (entry.label) }
                            } @else {
                                a href=(entry.href) { (entry.label) }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Hero
// ============================================================================

/// Props for [`hero`].
pub struct HeroProps<'a> {
    pub title: Markup,
    pub description: Markup,
    pub avatar: &'a str,
    pub social_buttons: Markup,
}

/// Landing-page hero banner.
pub fn hero(props: HeroProps) -> Markup {
    html! {
        section.hero {
            img.hero-avatar src=(props.avatar) alt="Avatar" width="128" height="128";
            div.hero-text {
                h1.hero-title { (props.title) }
                div.hero-description { (props.description) }
                div.social-buttons {
                    (props.social_buttons)
                }
            }
        }
    }
}

/// One social link. Shows the icon when configured, otherwise the label.
pub fn social_button(link: &SocialLink) -> Markup {
    html! {
        a.social-button href=(link.href) target="_blank" rel="noopener" aria-label=(link.label) {
            @if let Some(icon) = &link.icon {
                img src=(icon) alt="" width="24" height="24";
            } @else {
                (link.label)
            }
        }
    }
}

/// All social links, in the given order.
pub fn social_buttons(links: &[SocialLink]) -> Markup {
    html! {
        @for link in links {
            (social_button(link))
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Summary card used in post listings.
pub fn post_card(post: &Post) -> Markup {
    html! {
        li.post-card {
            a href=(post.url()) {
                span.post-card-title { (post.title) }
            }
            time datetime=(iso_date(post.pub_date)) { (display_date(post.pub_date)) }
            @if !post.description.is_empty() {
                p.post-card-description { (post.description) }
            }
        }
    }
}

/// The post layout: hero image, title, date, description, then the body.
pub fn post_layout(post: &Post, body: Markup) -> Markup {
    html! {
        article.post {
            @if let Some(src) = &post.img_src {
                img.post-hero src=(src) alt=(post.img_alt.as_deref().unwrap_or(""));
            }
            header.post-header {
                h1 { (post.title) }
                time datetime=(iso_date(post.pub_date)) { (display_date(post.pub_date)) }
                @if !post.description.is_empty() {
                    p.post-description { (post.description) }
                }
            }
            div.post-body {
                (body)
            }
        }
    }
}
