//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults are
//! serialized to a TOML value and the user's file is merged on top of them,
//! key by key, so a config file only needs the values it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── posts/                   # Articles (.md / .mdx)
//! └── public/                  # Static assets, copied verbatim
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! posts_dir = "posts"
//! assets_dir = "public"
//! recent_posts = 5          # Posts listed on the landing page
//!
//! [site]
//! title = "Dev Notes"
//! description = "Notes on Scala and Python"
//! author = ""
//! lang = "en"
//! base_url = ""             # Absolute origin for feed links, e.g. "https://example.com"
//!
//! [logo]
//! name = "Dev Notes"
//! # icon = "/favicon.svg"
//!
//! [hero]
//! title = "Hi, I write code"
//! description = "Articles about *Scala* and *Python*."   # inline markdown
//! avatar = "/assets/images/avatar.png"
//!
//! [[hero.social]]
//! label = "Twitter"
//! icon = "/assets/icons/twitter.svg"
//! href = "https://twitter.com/someone"
//!
//! [[nav]]
//! label = "Blog"
//! href = "/posts/"
//!
//! [colors.light]
//! background = "#ffffff"
//! ...
//!
//! [processing]
//! max_processes = 4         # Max parallel render workers (omit for auto = CPU cores)
//! ```
//!
//! Arrays (`nav`, `hero.social`) are replaced wholesale, not merged.
//! Unknown keys are rejected to catch typos early.

use crate::types::{NavEntry, SocialLink, is_external_href};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory under the content root holding articles.
    pub posts_dir: String,
    /// Directory under the content root copied verbatim to the output root.
    pub assets_dir: String,
    /// Number of posts listed on the landing page.
    pub recent_posts: usize,
    /// Site-wide metadata used in `<head>` and the feed.
    pub site: SiteMeta,
    /// Logo shown at the start of the navbar.
    pub logo: LogoConfig,
    /// Landing-page hero banner.
    pub hero: HeroConfig,
    /// Fixed navigation entries, in display order.
    pub nav: Vec<NavEntry>,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            assets_dir: "public".to_string(),
            recent_posts: 5,
            site: SiteMeta::default(),
            logo: LogoConfig::default(),
            hero: HeroConfig::default(),
            nav: default_nav(),
            colors: ColorConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

/// The stock navigation: Blog, GitHub, Twitter.
pub fn default_nav() -> Vec<NavEntry> {
    vec![
        NavEntry::new("Blog", "/posts/"),
        NavEntry::new("GitHub", "https://github.com/"),
        NavEntry::new("Twitter", "https://twitter.com/"),
    ]
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.hero.avatar.trim().is_empty() {
            return Err(ConfigError::Validation(
                "hero.avatar must not be empty".into(),
            ));
        }
        if self.recent_posts == 0 {
            return Err(ConfigError::Validation(
                "recent_posts must be at least 1".into(),
            ));
        }
        for entry in &self.nav {
            if entry.label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "nav entry for '{}' has an empty label",
                    entry.href
                )));
            }
            validate_href(&entry.href, "nav")?;
        }
        for link in &self.hero.social {
            validate_href(&link.href, "hero.social")?;
        }
        Ok(())
    }
}

fn validate_href(href: &str, field: &str) -> Result<(), ConfigError> {
    if href.starts_with('/') || is_external_href(href) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} href '{href}' must start with '/' or be an http(s):// or mailto: URL"
        )))
    }
}

/// Site-wide metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub author: String,
    /// `lang` attribute of the root `<html>` element.
    pub lang: String,
    /// Absolute origin used for feed links. Empty means site-relative links.
    pub base_url: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Dev Notes".to_string(),
            description: "Notes on Scala and Python".to_string(),
            author: String::new(),
            lang: "en".to_string(),
            base_url: String::new(),
        }
    }
}

impl SiteMeta {
    /// Join a site-relative path onto `base_url` (no-op when unset).
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Logo shown in the navbar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            name: "Dev Notes".to_string(),
            icon: None,
        }
    }
}

/// Landing-page hero banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    pub title: String,
    /// Inline markdown (emphasis, links, code spans).
    pub description: String,
    /// Avatar image reference; must resolve to a public asset or a URL.
    pub avatar: String,
    /// Social profile links, in display order.
    pub social: Vec<SocialLink>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "Hi, I write code".to_string(),
            description: "Articles about *Scala* and *Python*.".to_string(),
            avatar: "/assets/images/avatar.png".to_string(),
            social: Vec::new(),
        }
    }
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates, descriptions, footer.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Background of fenced code samples.
    pub code_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#0b57d0".to_string(),
            link_hover: "#06307a".to_string(),
            code_background: "#f5f5f5".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111318".to_string(),
            text: "#e8e8e8".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2c2f36".to_string(),
            link: "#8ab4f8".to_string(),
            link_hover: "#c2d7fb".to_string(),
            code_background: "#1b1e24".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (including arrays) replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# postpress configuration
# ========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory (under the content root) holding .md / .mdx articles.
posts_dir = "posts"

# Directory (under the content root) copied verbatim to the output root.
# Image references like "/assets/images/a.png" resolve against it.
assets_dir = "public"

# Number of posts listed on the landing page.
recent_posts = 5

# ---------------------------------------------------------------------------
# Site metadata
# ---------------------------------------------------------------------------
[site]
title = "Dev Notes"
description = "Notes on Scala and Python"
author = ""
lang = "en"
# Absolute origin for feed links, e.g. "https://example.com".
base_url = ""

# ---------------------------------------------------------------------------
# Logo (start of the navbar)
# ---------------------------------------------------------------------------
[logo]
name = "Dev Notes"
# icon = "/favicon.svg"

# ---------------------------------------------------------------------------
# Landing-page hero
# ---------------------------------------------------------------------------
[hero]
title = "Hi, I write code"
# Inline markdown: *emphasis*, `code`, [links](...).
description = "Articles about *Scala* and *Python*."
avatar = "/assets/images/avatar.png"
social = []

# Social links replace the (empty) default list as a whole:
# [[hero.social]]
# label = "Twitter"
# icon = "/assets/icons/twitter.svg"
# href = "https://twitter.com/someone"

# ---------------------------------------------------------------------------
# Navigation (replaces the default list as a whole)
# ---------------------------------------------------------------------------
[[nav]]
label = "Blog"
href = "/posts/"

[[nav]]
label = "GitHub"
href = "https://github.com/"

[[nav]]
label = "Twitter"
href = "https://twitter.com/"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"    # Dates, descriptions, footer
border = "#e0e0e0"
link = "#0b57d0"
link_hover = "#06307a"
code_background = "#f5f5f5"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111318"
text = "#e8e8e8"
text_muted = "#9a9a9a"
border = "#2c2f36"
link = "#8ab4f8"
link_hover = "#c2d7fb"
code_background = "#1b1e24"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel page-render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
        ("--color-code-bg", &scheme.code_background),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
