//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Landing page** (`/index.html`): hero banner plus the most recent posts
//! - **Post index** (`/posts/index.html`): every post, newest first
//! - **Post pages** (`/posts/{slug}/index.html`): one per content item
//! - **Feed** (`/rss.xml`): RSS 2.0, see [`crate::feed`]
//!
//! Every HTML page shares the same chrome: `<head>` metadata, the navbar and
//! the footer. The public assets directory is copied into the output root
//! unchanged.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── rss.xml
//! ├── posts/
//! │   ├── index.html
//! │   └── scala-101/
//! │       └── index.html
//! └── assets/                  # from content/public/
//!     └── images/...
//! ```
//!
//! Output is a pure function of the manifest: no timestamps, no random
//! ids. Building twice yields byte-identical files.

use crate::components::{self, HeroProps, LogoProps, PageHead};
use crate::config::{self, SiteConfig};
use crate::feed;
use crate::markdown;
use crate::scan::Manifest;
use crate::types::{NavEntry, Post};
use chrono::Datelike;
use maud::{Markup, html};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("post '{slug}' is missing required field `{field}`")]
    MissingField { slug: String, field: &'static str },
    #[error("nav entry '{label}' points at '{href}', which is not a generated page or public asset")]
    UnresolvedRoute { label: String, href: String },
}

const CSS_STATIC: &str = include_str!("../static/style.css");

pub const FEED_PATH: &str = "/rss.xml";

/// Everything shared by every page render.
pub struct SiteContext<'a> {
    pub config: &'a SiteConfig,
    pub navigation: &'a [NavEntry],
    pub css: &'a str,
    /// Year shown in the footer (newest post's year, not the wall clock)
    pub footer_year: Option<i32>,
}

impl<'a> SiteContext<'a> {
    pub fn new(manifest: &'a Manifest, css: &'a str) -> Self {
        Self {
            config: &manifest.config,
            navigation: &manifest.navigation,
            css,
            footer_year: manifest.posts.first().map(|p| p.pub_date.year()),
        }
    }
}

/// A written output file, for the CLI report.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory
    pub path: String,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub post_count: usize,
    pub assets_copied: usize,
}

/// Full stylesheet: theme colors from config, then the embedded base CSS.
pub fn build_css(config: &SiteConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC)
}

pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_from_manifest(&manifest, source_root, output_dir)
}

/// Render and write the site for an in-memory manifest.
pub fn generate_from_manifest(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let assets_root = source_root.join(&manifest.config.assets_dir);
    check_nav_routes(&manifest.navigation, &site_routes(manifest), &assets_root)?;

    let css = build_css(&manifest.config);
    let ctx = SiteContext::new(manifest, &css);

    // Render everything before touching the output directory, so a bad post
    // never leaves a half-written site behind.
    let post_pages: Vec<(GeneratedPage, String)> = manifest
        .posts
        .par_iter()
        .map(|post| {
            let page = assemble_post_page(post, &ctx)?;
            Ok((
                GeneratedPage {
                    title: post.title.clone(),
                    path: format!("posts/{}/index.html", post.slug),
                },
                page.into_string(),
            ))
        })
        .collect::<Result<_, GenerateError>>()?;

    let mut outputs = vec![
        (
            GeneratedPage {
                title: "Home".to_string(),
                path: "index.html".to_string(),
            },
            render_index(manifest, &ctx).into_string(),
        ),
        (
            GeneratedPage {
                title: "Blog".to_string(),
                path: "posts/index.html".to_string(),
            },
            render_posts_index(manifest, &ctx).into_string(),
        ),
    ];
    outputs.extend(post_pages);
    outputs.push((
        GeneratedPage {
            title: "Feed".to_string(),
            path: "rss.xml".to_string(),
        },
        feed::render_feed(manifest),
    ));

    fs::create_dir_all(output_dir)?;
    let assets_copied = if assets_root.is_dir() {
        copy_dir_recursive(&assets_root, output_dir)?
    } else {
        0
    };

    let mut report = GenerateReport {
        post_count: manifest.posts.len(),
        assets_copied,
        ..Default::default()
    };
    for (page, contents) in outputs {
        let target = output_dir.join(&page.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, contents)?;
        report.pages.push(page);
    }
    Ok(report)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copied += copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Route resolution
// ============================================================================

/// Every site-relative URL the generator produces.
pub fn site_routes(manifest: &Manifest) -> BTreeSet<String> {
    let mut routes: BTreeSet<String> = ["/", "/posts/", FEED_PATH]
        .into_iter()
        .map(str::to_string)
        .collect();
    routes.extend(manifest.posts.iter().map(Post::url));
    routes
}

/// Internal nav targets must land on a generated route or a public file.
fn check_nav_routes(
    navigation: &[NavEntry],
    routes: &BTreeSet<String>,
    assets_root: &Path,
) -> Result<(), GenerateError> {
    for entry in navigation.iter().filter(|e| !e.is_external()) {
        if !route_resolves(&entry.href, routes, assets_root) {
            return Err(GenerateError::UnresolvedRoute {
                label: entry.label.clone(),
                href: entry.href.clone(),
            });
        }
    }
    Ok(())
}

fn route_resolves(href: &str, routes: &BTreeSet<String>, assets_root: &Path) -> bool {
    let path = href.split(['#', '?']).next().unwrap_or(href);
    let path = path.strip_suffix("index.html").unwrap_or(path);
    if routes.contains(path) || routes.contains(&format!("{path}/")) {
        return true;
    }
    let rel: PathBuf = path.trim_start_matches('/').into();
    let stays_inside = rel
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    stays_inside && !rel.as_os_str().is_empty() && assets_root.join(rel).is_file()
}

// ============================================================================
// Page assembly
// ============================================================================

/// The shared navbar, identical on every page.
fn site_navbar(ctx: &SiteContext) -> Markup {
    let logo = components::logo(LogoProps {
        icon: components::logo_icon(ctx.config.logo.icon.as_deref()),
        name: &ctx.config.logo.name,
    });
    components::navbar(logo, ctx.navigation)
}

/// Wrap page content in the shared layout: head, navbar, main, footer.
fn layout(ctx: &SiteContext, head: &PageHead, main: Markup) -> Markup {
    let site = &ctx.config.site;
    let content = html! {
        (site_navbar(ctx))
        main { (main) }
        (components::site_footer(&site.author, &site.title, ctx.footer_year))
    };
    components::base_document(head, ctx.css, content)
}

/// Compose one post into a full page.
///
/// Fails instead of rendering when the title is blank; the date is carried
/// by the type and cannot be missing.
pub fn assemble_post_page(post: &Post, ctx: &SiteContext) -> Result<Markup, GenerateError> {
    if post.title.trim().is_empty() {
        return Err(GenerateError::MissingField {
            slug: post.slug.clone(),
            field: "title",
        });
    }
    let head = PageHead {
        title: &post.title,
        description: &post.description,
        lang: &ctx.config.site.lang,
        image: post.img_src.as_deref(),
        published: Some(post.pub_date),
        feed: Some(FEED_PATH),
    };
    let article = components::post_layout(post, markdown::render_body(&post.body));
    Ok(layout(ctx, &head, article))
}

/// Landing page: hero plus recent posts.
pub fn render_index(manifest: &Manifest, ctx: &SiteContext) -> Markup {
    let config = ctx.config;
    let hero = components::hero(HeroProps {
        title: html! { (config.hero.title) },
        description: markdown::render_inline(&config.hero.description),
        avatar: &config.hero.avatar,
        social_buttons: components::social_buttons(&config.hero.social),
    });
    let recent = manifest.posts.iter().take(config.recent_posts);

    let main = html! {
        (hero)
        section.recent-posts {
            h2 { "Recent posts" }
            ul.post-list {
                @for post in recent {
                    (components::post_card(post))
                }
            }
            @if manifest.posts.len() > config.recent_posts {
                a.all-posts href="/posts/" { "All posts →" }
            }
        }
    };

    let head = PageHead {
        title: &config.site.title,
        description: &config.site.description,
        lang: &config.site.lang,
        feed: Some(FEED_PATH),
        ..Default::default()
    };
    layout(ctx, &head, main)
}

/// `/posts/`: every post, newest first.
pub fn render_posts_index(manifest: &Manifest, ctx: &SiteContext) -> Markup {
    let title = format!("Blog · {}", ctx.config.site.title);
    let main = html! {
        section.post-index {
            h1 { "Blog" }
            @if manifest.posts.is_empty() {
                p.empty { "Nothing published yet." }
            } @else {
                ul.post-list {
                    @for post in &manifest.posts {
                        (components::post_card(post))
                    }
                }
            }
        }
    };
    let head = PageHead {
        title: &title,
        description: &ctx.config.site.description,
        lang: &ctx.config.site.lang,
        feed: Some(FEED_PATH),
        ..Default::default()
    };
    layout(ctx, &head, main)
}

// ============================================================================
// Tests
// ============================================================================
