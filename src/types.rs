//! Shared types used across all pipeline stages.
//!
//! Raw source entities come from the catalogs and the config table and are
//! read-only to the pipeline. [`Candidate`] is what the source registry
//! hands to the validation gate, and [`SitemapUrlRecord`] is what comes out
//! of it. A record can only be built by the gate, so every record in the
//! pipeline already satisfies the scheme/host invariant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sitemap `<changefreq>` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which source a candidate URL was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    StaticPage,
    ToolCategory,
    Tool,
    BlogCategory,
    BlogPost,
}

impl SourceKind {
    /// Human label used in the stats summary.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::StaticPage => "static pages",
            SourceKind::ToolCategory => "tool categories",
            SourceKind::Tool => "tools",
            SourceKind::BlogCategory => "blog categories",
            SourceKind::BlogPost => "blog posts",
        }
    }
}

/// A row of the static-page table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticPageEntry {
    /// Site-relative path, `""` or `"/"` for the home page.
    pub path: String,
    pub priority: f32,
    pub changefreq: ChangeFreq,
}

/// One category key of the tool catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCategoryEntry {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolEntry {
    pub slug: String,
    pub category: String,
}

/// A blog post as listed by the content catalog.
///
/// `date` is free-form; it only becomes `lastmod` if it parses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlogPostEntry {
    pub slug: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A URL proposed by the source registry, not yet sanitized or validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub source: SourceKind,
    pub url: String,
    /// Raw post date for blog posts; `None` means "use the generation time".
    pub lastmod: Option<String>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// One `<url>` entry of the final sitemap.
///
/// Fields are private: records are only created by
/// [`validate::admit`](crate::validate::admit), which enforces that `loc` is an
/// absolute https URL on the configured origin.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrlRecord {
    loc: String,
    lastmod: String,
    changefreq: ChangeFreq,
    priority: f32,
    source: SourceKind,
}

impl SitemapUrlRecord {
    pub(crate) fn new(
        loc: String,
        lastmod: String,
        changefreq: ChangeFreq,
        priority: f32,
        source: SourceKind,
    ) -> Self {
        Self {
            loc,
            lastmod,
            changefreq,
            priority,
            source,
        }
    }

    pub fn loc(&self) -> &str {
        &self.loc
    }

    /// ISO-8601 timestamp (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
    pub fn lastmod(&self) -> &str {
        &self.lastmod
    }

    pub fn changefreq(&self) -> ChangeFreq {
        self.changefreq
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }

    pub fn source(&self) -> SourceKind {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changefreq_serializes_lowercase() {
        let value = toml::Value::try_from(ChangeFreq::Monthly).unwrap();
        assert_eq!(value.as_str(), Some("monthly"));
    }

    #[test]
    fn changefreq_display_matches_protocol_values() {
        let all = [
            ChangeFreq::Daily,
            ChangeFreq::Weekly,
            ChangeFreq::Monthly,
            ChangeFreq::Yearly,
        ];
        let shown: Vec<String> = all.iter().map(|c| c.to_string()).collect();
        assert_eq!(shown, vec!["daily", "weekly", "monthly", "yearly"]);
    }

    #[test]
    fn blog_post_tolerates_missing_date_and_tags() {
        let post: BlogPostEntry = serde_json::from_str(r#"{"slug": "hello"}"#).unwrap();
        assert_eq!(post.slug, "hello");
        assert!(post.date.is_empty());
        assert!(post.tags.is_empty());
    }
}
