//! Post header parsing.
//!
//! Every article starts with a YAML header between `---` fences:
//!
//! ```text
//! ---
//! layout: ../../layouts/PostLayout.astro
//! title: "Scala 101"
//! description: "Learn the very basics of Scala 3"
//! pubDate: 2024-02-18
//! imgSrc: "/assets/images/articles/scala-101-1.png"
//! imgAlt: "Scala logo"
//! ---
//!
//! Prose and fenced code follow...
//! ```
//!
//! Key names are read verbatim. `title` and `pubDate` are required; a post
//! missing either fails the build instead of rendering a broken page. Other
//! unknown keys are ignored so editor tooling can add its own.

use crate::types::Post;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("no `---` header block at the start of the file")]
    MissingHeader,
    #[error("header is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("required header field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("`pubDate` value '{0}' is not a recognised date")]
    InvalidDate(String),
}

/// Header keys as authored. Everything optional here; requiredness is
/// enforced when converting to a [`Post`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHeader {
    layout: Option<String>,
    title: Option<String>,
    description: Option<String>,
    pub_date: Option<serde_yaml::Value>,
    img_src: Option<String>,
    img_alt: Option<String>,
}

/// Split a document into its header YAML and body.
///
/// The header is everything between a first line of `---` and the next line
/// of `---`. The body keeps its original line structure.
pub fn split_front_matter(content: &str) -> Result<(String, String), FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let lines: Vec<&str> = content.lines().collect();
    if lines.first().map(|l| l.trim()) != Some("---") {
        return Err(FrontMatterError::MissingHeader);
    }
    let end = lines[1..]
        .iter()
        .position(|l| l.trim() == "---")
        .map(|i| i + 1)
        .ok_or(FrontMatterError::MissingHeader)?;
    let header = lines[1..end].join("\n");
    let body = lines[end + 1..].join("\n");
    Ok((header, body))
}

/// Parse a full article into a [`Post`].
///
/// `slug` and `source_path` come from the caller (scan derives them from the
/// file location). `is_mdx` strips leading `import`/`export` wiring.
pub fn parse_post(
    slug: &str,
    source_path: &str,
    content: &str,
    is_mdx: bool,
) -> Result<Post, FrontMatterError> {
    let (header, body) = split_front_matter(content)?;
    let raw: RawHeader = if header.trim().is_empty() {
        RawHeader::default()
    } else {
        serde_yaml::from_str(&header)?
    };

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(FrontMatterError::MissingField("title"))?;
    let pub_date = match raw.pub_date {
        None | Some(serde_yaml::Value::Null) => {
            return Err(FrontMatterError::MissingField("pubDate"));
        }
        Some(value) => parse_pub_date(&yaml_scalar_text(&value))?,
    };

    let body = if is_mdx { strip_mdx_wiring(&body) } else { body };

    Ok(Post {
        slug: slug.to_string(),
        source_path: source_path.to_string(),
        title,
        description: raw.description.unwrap_or_default(),
        pub_date,
        img_src: raw.img_src.filter(|s| !s.trim().is_empty()),
        img_alt: raw.img_alt,
        layout: raw.layout,
        body,
    })
}

fn yaml_scalar_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}

/// Parse a `pubDate` value.
///
/// Accepted forms:
/// - `2024-02-18`
/// - `2024-02-18T10:00:00Z` (RFC 3339, date part kept)
/// - `Feb 18 2024`
pub fn parse_pub_date(raw: &str) -> Result<NaiveDate, FrontMatterError> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%b %d %Y") {
        return Ok(date);
    }
    Err(FrontMatterError::InvalidDate(s.to_string()))
}

/// Drop top-level ESM `import`/`export` lines that precede the prose in MDX.
fn strip_mdx_wiring(body: &str) -> String {
    let mut lines = body.lines().peekable();
    while let Some(line) = lines.peek() {
        let t = line.trim_start();
        if t.is_empty() || t.starts_with("import ") || t.starts_with("export ") {
            lines.next();
        } else {
            break;
        }
    }
    lines.collect::<Vec<_>>().join("\n")
}
