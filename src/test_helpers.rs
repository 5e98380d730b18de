//! Shared test utilities for the postpress test suite.
//!
//! Provides fixture setup, small site builders, and lookup helpers that work
//! with scan-phase data structures (`Manifest`, `Post`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let post = find_post(&manifest, "scala-101");
//! assert_eq!(post.title, "Scala 101");
//! assert_eq!(nav_labels(&manifest), vec!["Blog", "GitHub", "Twitter"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::Post;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Smallest valid site: no config, an empty `posts/`, and the default avatar.
pub fn minimal_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("posts")).unwrap();
    let images = tmp.path().join("public/assets/images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("avatar.png"), b"png").unwrap();
    tmp
}

/// Write a post with a minimal header under `posts/`.
pub fn write_post(root: &Path, rel: &str, title: &str, date: &str) {
    let path = root.join("posts").join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let content = format!("---\ntitle: {title}\npubDate: {date}\n---\n\nBody of {title}.\n");
    fs::write(path, content).unwrap();
}

// =========================================================================
// Manifest lookups (panic with a clear message on miss)
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a Post {
    manifest
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs = post_slugs(manifest);
            panic!("post '{slug}' not found. Available: {slugs:?}")
        })
}

/// All post slugs in manifest order.
pub fn post_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.slug.as_str()).collect()
}

/// Navigation labels in display order.
pub fn nav_labels(manifest: &Manifest) -> Vec<&str> {
    manifest
        .navigation
        .iter()
        .map(|n| n.label.as_str())
        .collect()
}
