//! Shared test utilities for the unit test suite.
//!
//! Builders for in-memory catalogs and records, so tests can exercise the
//! pipeline without writing JSON files.

use crate::catalog::{ContentManifest, ToolManifest};
use crate::types::{BlogPostEntry, ChangeFreq, SitemapUrlRecord, SourceKind, ToolEntry};

/// Fixed generation timestamp used across tests.
pub const GENERATED_AT: &str = "2025-06-01T12:00:00.000Z";

pub fn generated_at() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(GENERATED_AT)
        .unwrap()
        .with_timezone(&chrono::Utc)
}

/// Build a tool catalog from category slugs and `(tool, category)` pairs.
pub fn tool_manifest(categories: &[&str], tools: &[(&str, &str)]) -> ToolManifest {
    ToolManifest {
        categories: categories
            .iter()
            .map(|c| (c.to_string(), serde_json::json!({})))
            .collect(),
        tools: tools
            .iter()
            .map(|(slug, category)| ToolEntry {
                slug: slug.to_string(),
                category: category.to_string(),
            })
            .collect(),
    }
}

/// A blog post fixture.
pub fn post(slug: &str, date: &str, tags: &[&str]) -> BlogPostEntry {
    BlogPostEntry {
        slug: slug.to_string(),
        date: date.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn content_manifest(posts: Vec<BlogPostEntry>) -> ContentManifest {
    ContentManifest { posts }
}

/// A record that skips the gate. Only for tests of later stages.
pub fn record(loc: &str, priority: f32) -> SitemapUrlRecord {
    SitemapUrlRecord::new(
        loc.to_string(),
        GENERATED_AT.to_string(),
        ChangeFreq::Weekly,
        priority,
        SourceKind::Tool,
    )
}

/// Assert that a record list is in sitemap order. Panics with the offending pair.
pub fn assert_sitemap_order(records: &[SitemapUrlRecord]) {
    for pair in records.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let ordered = a.priority() > b.priority()
            || (a.priority() == b.priority() && a.loc() <= b.loc());
        assert!(
            ordered,
            "out of order: ({}, {}) before ({}, {})",
            a.priority(),
            a.loc(),
            b.priority(),
            b.loc()
        );
    }
}
