//! Pipeline configuration.
//!
//! Handles loading, validating, and merging `sitemap.toml`. The file is
//! optional: stock defaults (including the static-page table) are used when it
//! is absent, and a present file only needs the keys it wants to override.
//! The resolved [`SitemapConfig`] is passed explicitly into the pipeline.
//!
//! ## Configuration Options
//!
//! ```toml
//! origin = "https://example.com"
//!
//! [routes]
//! tool_category = "/category"
//! tool = "/tools"
//! blog_category = "/blog/category"
//! blog_post = "/blog"
//!
//! [sources.tool_category]
//! priority = 0.8
//! changefreq = "weekly"
//!
//! [output]
//! targets = ["public/sitemap.xml", "dist/sitemap.xml"]
//! dedupe_locs = false
//!
//! [[static_pages]]
//! path = "/"
//! priority = 1.0
//! changefreq = "daily"
//! ```
//!
//! Tables merge key-by-key over the defaults; arrays (`static_pages`,
//! `output.targets`) replace the default array entirely. Unknown keys are
//! rejected to catch typos early.

use crate::types::{ChangeFreq, StaticPageEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "sitemap.toml";

/// Sitemap pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Site origin every `loc` must live on, e.g. `https://example.com`.
    pub origin: String,
    /// Path prefixes for catalog-derived URLs.
    pub routes: RoutesConfig,
    /// Priority and changefreq for each catalog-derived source.
    pub sources: SourcesConfig,
    /// Where the sitemap is written.
    pub output: OutputConfig,
    /// Fixed pages that are always listed.
    pub static_pages: Vec<StaticPageEntry>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            origin: "https://example.com".to_string(),
            routes: RoutesConfig::default(),
            sources: SourcesConfig::default(),
            output: OutputConfig::default(),
            static_pages: default_static_pages(),
        }
    }
}

fn default_static_pages() -> Vec<StaticPageEntry> {
    let page = |path: &str, priority: f32, changefreq: ChangeFreq| StaticPageEntry {
        path: path.to_string(),
        priority,
        changefreq,
    };
    vec![
        page("/", 1.0, ChangeFreq::Daily),
        page("/tools", 0.9, ChangeFreq::Weekly),
        page("/blog", 0.9, ChangeFreq::Daily),
        page("/about", 0.5, ChangeFreq::Monthly),
        page("/contact", 0.5, ChangeFreq::Monthly),
        page("/faq", 0.4, ChangeFreq::Monthly),
        page("/privacy", 0.3, ChangeFreq::Yearly),
        page("/terms", 0.3, ChangeFreq::Yearly),
    ]
}

impl SitemapConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = Url::parse(&self.origin).map_err(|e| {
            ConfigError::Validation(format!("origin '{}' is not a URL: {e}", self.origin))
        })?;
        if origin.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "origin must use https, got '{}'",
                origin.scheme()
            )));
        }
        if origin.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::Validation("origin must have a host".into()));
        }

        for page in &self.static_pages {
            check_priority(&format!("static_pages '{}'", page.path), page.priority)?;
        }
        for (name, source) in self.sources.named() {
            check_priority(&format!("sources.{name}"), source.priority)?;
        }

        if self.output.targets.is_empty() {
            return Err(ConfigError::Validation(
                "output.targets must not be empty".into(),
            ));
        }
        let mut seen = HashSet::new();
        for target in &self.output.targets {
            if target.file_name().is_none() {
                return Err(ConfigError::Validation(format!(
                    "output target '{}' must name a file",
                    target.display()
                )));
            }
            if !seen.insert(target) {
                return Err(ConfigError::Validation(format!(
                    "output target '{}' is listed twice",
                    target.display()
                )));
            }
        }
        Ok(())
    }

    /// Parsed origin. Only meaningful on a validated config.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.origin)
            .map_err(|e| ConfigError::Validation(format!("origin '{}': {e}", self.origin)))
    }
}

fn check_priority(what: &str, priority: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&priority) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{what}: priority must be 0.0-1.0, got {priority}"
        )))
    }
}

/// URL path prefixes for catalog-derived pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
    pub tool_category: String,
    pub tool: String,
    pub blog_category: String,
    pub blog_post: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            tool_category: "/category".to_string(),
            tool: "/tools".to_string(),
            blog_category: "/blog/category".to_string(),
            blog_post: "/blog".to_string(),
        }
    }
}

/// Priority and changefreq applied to every URL of one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSettings {
    pub priority: f32,
    pub changefreq: ChangeFreq,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    pub tool_category: SourceSettings,
    pub tool: SourceSettings,
    pub blog_category: SourceSettings,
    pub blog_post: SourceSettings,
}

impl SourcesConfig {
    fn named(&self) -> [(&'static str, &SourceSettings); 4] {
        [
            ("tool_category", &self.tool_category),
            ("tool", &self.tool),
            ("blog_category", &self.blog_category),
            ("blog_post", &self.blog_post),
        ]
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            tool_category: SourceSettings {
                priority: 0.8,
                changefreq: ChangeFreq::Weekly,
            },
            tool: SourceSettings {
                priority: 0.7,
                changefreq: ChangeFreq::Monthly,
            },
            blog_category: SourceSettings {
                priority: 0.6,
                changefreq: ChangeFreq::Weekly,
            },
            blog_post: SourceSettings {
                priority: 0.6,
                changefreq: ChangeFreq::Monthly,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Every target receives the same bytes.
    pub targets: Vec<PathBuf>,
    /// Collapse records sharing a `loc`, keeping the highest-priority one.
    pub dedupe_locs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            targets: vec![
                PathBuf::from("public/sitemap.xml"),
                PathBuf::from("dist/sitemap.xml"),
            ],
            dedupe_locs: false,
        }
    }
}

// =============================================================================
// Loading: stock defaults overlaid with sitemap.toml
// =============================================================================

/// [`SitemapConfig::default`] as a TOML tree, the base every overlay lands on.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SitemapConfig::default()).expect("default config must serialize")
}

/// Lay `overlay` over `base`.
///
/// Only tables are merged, key by key and recursively. Any other overlay value
/// wins as a whole, so a `[[static_pages]]` list in the file replaces the
/// stock table instead of extending it.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Parse `sitemap.toml` without interpreting it. `None` when there is no file.
fn read_overlay(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(toml::from_str(&text)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve the pipeline config: stock defaults, then `path` on top if it
/// exists, then [`SitemapConfig::validate`].
pub fn load_config(path: &Path) -> Result<SitemapConfig, ConfigError> {
    let tree = match read_overlay(path)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SitemapConfig = tree.try_into()?;
    config.validate()?;
    Ok(config)
}

/// The annotated `sitemap.toml` printed by `gen-config`. Parses back to
/// [`SitemapConfig::default`].
pub fn stock_config_toml() -> &'static str {
    r##"# Sitemap Generator Configuration
# ===============================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Site origin. Every URL in the sitemap must be https and on this host;
# anything else is dropped and counted as rejected.
origin = "https://example.com"

# ---------------------------------------------------------------------------
# URL prefixes for catalog-derived pages: <origin><prefix>/<slug>
# ---------------------------------------------------------------------------
[routes]
tool_category = "/category"
tool = "/tools"
blog_category = "/blog/category"
blog_post = "/blog"

# ---------------------------------------------------------------------------
# Priority (0.0-1.0) and changefreq (daily|weekly|monthly|yearly) per source
# ---------------------------------------------------------------------------
[sources.tool_category]
priority = 0.8
changefreq = "weekly"

[sources.tool]
priority = 0.7
changefreq = "monthly"

[sources.blog_category]
priority = 0.6
changefreq = "weekly"

[sources.blog_post]
priority = 0.6
changefreq = "monthly"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Every target receives identical bytes and is verified after writing.
targets = ["public/sitemap.xml", "dist/sitemap.xml"]

# Collapse entries that share a URL, keeping the highest-priority one.
dedupe_locs = false

# ---------------------------------------------------------------------------
# Static pages. Defining any replaces the whole table.
# ---------------------------------------------------------------------------
[[static_pages]]
path = "/"
priority = 1.0
changefreq = "daily"

[[static_pages]]
path = "/tools"
priority = 0.9
changefreq = "weekly"

[[static_pages]]
path = "/blog"
priority = 0.9
changefreq = "daily"

[[static_pages]]
path = "/about"
priority = 0.5
changefreq = "monthly"

[[static_pages]]
path = "/contact"
priority = 0.5
changefreq = "monthly"

[[static_pages]]
path = "/faq"
priority = 0.4
changefreq = "monthly"

[[static_pages]]
path = "/privacy"
priority = 0.3
changefreq = "yearly"

[[static_pages]]
path = "/terms"
priority = 0.3
changefreq = "yearly"
"##
}
