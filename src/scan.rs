//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the content directory, parses every
//! article header, checks that referenced assets exist, and produces the
//! [`Manifest`] the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml                      # Site configuration (optional)
//! ├── posts/
//! │   ├── scala-101.md                 # slug: scala-101
//! │   ├── python-generators.mdx        # slug: python-generators
//! │   ├── type-classes/
//! │   │   └── index.md                 # slug: type-classes
//! │   └── _draft-notes.md              # leading underscore = skipped
//! └── public/
//!     └── assets/images/articles/scala-101-1.png
//! ```
//!
//! ## Validation
//!
//! The scanner fails the whole build on the first problem it finds:
//! - A post header without `title` or `pubDate`
//! - Two posts resolving to the same slug
//! - A site-absolute image reference (`/assets/...`) with no file behind it
//! - A relative image reference (pages live at different depths)

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontMatterError};
use crate::types::{NavEntry, Post, is_external_href};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path}: {source}")]
    Post {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
    #[error("Duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{referenced_by}: asset '{reference}' not found in the public directory")]
    MissingAsset {
        reference: String,
        referenced_by: String,
    },
    #[error("{referenced_by}: asset '{reference}' must start with '/' or be a URL")]
    RelativeAsset {
        reference: String,
        referenced_by: String,
    },
    #[error("{referenced_by}: asset '{reference}' points outside the public directory")]
    EscapingAsset {
        reference: String,
        referenced_by: String,
    },
    #[error("{path}: slug '{slug}' may only contain ASCII letters, digits, '.', '_' and '-'")]
    InvalidSlug { slug: String, path: PathBuf },
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Fixed site-wide navigation, in display order.
    pub navigation: Vec<NavEntry>,
    /// All posts, newest first.
    pub posts: Vec<Post>,
    pub config: SiteConfig,
}

const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let assets_root = root.join(&config.assets_dir);

    check_site_assets(&config, &assets_root)?;

    let posts_root = root.join(&config.posts_dir);
    let posts = if posts_root.is_dir() {
        scan_posts(&posts_root, &assets_root)?
    } else {
        Vec::new()
    };

    Ok(Manifest {
        navigation: config.nav.clone(),
        posts,
        config,
    })
}

fn scan_posts(posts_root: &Path, assets_root: &Path) -> Result<Vec<Post>, ScanError> {
    let mut by_slug: BTreeMap<String, Post> = BTreeMap::new();

    let walker = WalkDir::new(posts_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_post_file(path) {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if stem.starts_with('_') {
            continue;
        }

        let rel_path = path.strip_prefix(posts_root).unwrap_or(path);
        let slug = slug_for(rel_path, &stem);
        if !is_valid_slug(&slug) {
            return Err(ScanError::InvalidSlug {
                slug,
                path: path.to_path_buf(),
            });
        }
        let is_mdx = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("mdx"));

        let content = fs::read_to_string(path)?;
        let post = frontmatter::parse_post(
            &slug,
            &rel_path.to_string_lossy(),
            &content,
            is_mdx,
        )
        .map_err(|source| ScanError::Post {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(img) = &post.img_src {
            check_asset(img, &post.source_path, assets_root)?;
        }

        if let Some(existing) = by_slug.get(&slug) {
            return Err(ScanError::DuplicateSlug {
                slug,
                first: PathBuf::from(&existing.source_path),
                second: rel_path.to_path_buf(),
            });
        }
        by_slug.insert(slug, post);
    }

    let mut posts: Vec<Post> = by_slug.into_values().collect();
    posts.sort_by(|a, b| {
        b.pub_date
            .cmp(&a.pub_date)
            .then_with(|| a.slug.cmp(&b.slug))
    });
    Ok(posts)
}

/// `posts/type-classes/index.md` → `type-classes`; otherwise the file stem.
fn slug_for(rel_path: &Path, stem: &str) -> String {
    if stem.eq_ignore_ascii_case("index")
        && let Some(parent) = rel_path.parent().and_then(|p| p.file_name())
    {
        return parent.to_string_lossy().to_string();
    }
    stem.to_string()
}

/// Slugs go into URLs unencoded: only `[A-Za-z0-9._-]`.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn is_post_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    POST_EXTENSIONS.contains(&ext.as_str())
}

/// Check the images config points at: avatar, logo icon, social icons.
fn check_site_assets(config: &SiteConfig, assets_root: &Path) -> Result<(), ScanError> {
    check_asset(&config.hero.avatar, "hero.avatar", assets_root)?;
    if let Some(icon) = &config.logo.icon {
        check_asset(icon, "logo.icon", assets_root)?;
    }
    for link in &config.hero.social {
        if let Some(icon) = &link.icon {
            check_asset(icon, &format!("hero.social[{}].icon", link.label), assets_root)?;
        }
    }
    Ok(())
}

/// Resolve a site-absolute reference against the public directory.
///
/// Remote references are accepted unchecked.
fn check_asset(reference: &str, referenced_by: &str, assets_root: &Path) -> Result<(), ScanError> {
    if is_external_href(reference) {
        return Ok(());
    }
    let Some(rel) = reference.strip_prefix('/') else {
        return Err(ScanError::RelativeAsset {
            reference: reference.to_string(),
            referenced_by: referenced_by.to_string(),
        });
    };
    if Path::new(rel)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(ScanError::EscapingAsset {
            reference: reference.to_string(),
            referenced_by: referenced_by.to_string(),
        });
    }
    if assets_root.join(rel).is_file() {
        Ok(())
    } else {
        Err(ScanError::MissingAsset {
            reference: reference.to_string(),
            referenced_by: referenced_by.to_string(),
        })
    }
}
