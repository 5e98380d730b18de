//! CLI output formatting for the pipeline stages.
//!
//! Output is information-first: every post is shown by position, title and
//! date, with its source file as an indented context line.
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Python Generators (Apr 2, 2024)
//!     Source: python-generators.mdx
//! 002 Scala 101 (Feb 18, 2024)
//!     Source: scala-101.md
//!     Image: /assets/images/articles/scala-101-1.png
//!
//! Navigation
//!     Blog → /posts/
//!     GitHub → https://github.com/
//!
//! Config
//!     config.toml
//!     public/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Blog → posts/index.html
//! 001 Python Generators → posts/python-generators/index.html
//! Feed → rss.xml
//!
//! Generated 2 posts, 5 pages, 3 assets
//! ```
//!
//! Each stage has a pure `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::components::display_date;
use crate::generate::GenerateReport;
use crate::scan::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// Scan output
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    if manifest.posts.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, post) in manifest.posts.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            post.title,
            display_date(post.pub_date)
        ));
        lines.push(format!("    Source: {}", post.source_path));
        if !post.description.is_empty() {
            lines.push(format!("    {}", truncate_desc(&post.description, 60)));
        }
        if let Some(img) = &post.img_src {
            lines.push(format!("    Image: {}", img));
        }
    }

    lines.push(String::new());
    lines.push("Navigation".to_string());
    for entry in &manifest.navigation {
        lines.push(format!("    {} \u{2192} {}", entry.label, entry.href));
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (defaults)".to_string());
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("    {}/", manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut post_index = 0;

    for page in &report.pages {
        let is_post = page.path.starts_with("posts/") && page.path != "posts/index.html";
        if is_post {
            post_index += 1;
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(post_index),
                page.title,
                page.path
            ));
        } else {
            lines.push(format!("{} \u{2192} {}", page.title, page.path));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} {}, {} pages, {} {}",
        report.post_count,
        if report.post_count == 1 { "post" } else { "posts" },
        report.pages.len(),
        report.assets_copied,
        if report.assets_copied == 1 { "asset" } else { "assets" },
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::*;

    #[test]
    fn scan_output_lists_posts_in_order() {
        let tmp = setup_fixtures();
        let manifest = crate::scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Posts");
        assert!(lines[1].starts_with("001 Python Generators"));
        assert!(lines.iter().any(|l| l == "002 Type Classes in Scala 3 (Mar 10, 2024)"));
        assert!(lines.iter().any(|l| l == "003 Scala 101 (Feb 18, 2024)"));
        assert!(
            lines
                .iter()
                .any(|l| l == "    Image: /assets/images/articles/scala-101-1.png")
        );
    }

    #[test]
    fn scan_output_shows_navigation_and_config() {
        let tmp = setup_fixtures();
        let manifest = crate::scan::scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert!(lines.iter().any(|l| l == "    Blog \u{2192} /posts/"));
        assert!(lines.iter().any(|l| l == "    config.toml"));
        assert!(lines.iter().any(|l| l == "    public/"));
    }

    #[test]
    fn generate_output_numbers_posts_only() {
        let report = GenerateReport {
            pages: vec![
                GeneratedPage {
                    title: "Home".into(),
                    path: "index.html".into(),
                },
                GeneratedPage {
                    title: "Blog".into(),
                    path: "posts/index.html".into(),
                },
                GeneratedPage {
                    title: "Scala 101".into(),
                    path: "posts/scala-101/index.html".into(),
                },
            ],
            post_count: 1,
            assets_copied: 2,
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "Home \u{2192} index.html");
        assert_eq!(lines[1], "Blog \u{2192} posts/index.html");
        assert_eq!(lines[2], "001 Scala 101 \u{2192} posts/scala-101/index.html");
        assert_eq!(lines.last().unwrap(), "Generated 1 post, 3 pages, 2 assets");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_desc("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_desc("short", 60), "short");
    }
}
