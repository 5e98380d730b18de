//! # Postpress
//!
//! A static generator for a personal technical blog. Articles are markdown
//! (or MDX) files with a small header; the output is a plain HTML site with a
//! landing page, a post index, one page per article and an RSS feed.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Content goes through two independent stages. The first produces a JSON
//! manifest that the second consumes:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable, so a failed generate can be debugged by
//! reading exactly what the scanner saw. Each stage is also testable on its
//! own: generation tests can build a `Manifest` in memory instead of scanning
//! a content directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks `posts/`, parses headers, checks assets, produces the manifest |
//! | [`generate`] | Stage 2: assembles pages from components and writes `dist/` |
//! | [`frontmatter`] | Article header parsing (`title`, `pubDate`, `imgSrc`, ...) |
//! | [`markdown`] | Markdown → HTML for post bodies and inline config text |
//! | [`components`] | Presentational pieces: navbar, logo, hero, post layout |
//! | [`feed`] | RSS 2.0 feed |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized between stages (`Post`, `NavEntry`) |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Components are
//! plain functions returning `Markup`, parents pass children in as `Markup`
//! values, and every interpolated string is escaped.
//!
//! ## Deterministic Output
//!
//! Nothing in the output depends on the wall clock. The footer year and the
//! feed's `lastBuildDate` come from the newest post, so rebuilding unchanged
//! content yields byte-identical files.

pub mod components;
pub mod config;
pub mod feed;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
