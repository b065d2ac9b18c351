//! Read-only collaborator interfaces for the source registry.
//!
//! The pipeline never reaches for content globally; it is handed a
//! [`ContentCatalog`] and a [`ToolCatalog`]. The JSON-backed manifests in this
//! module are the production implementations. A missing catalog file is not
//! an error, it is simply an empty catalog.
//!
//! ## File Formats
//!
//! ```text
//! content.json   { "posts": [ { "slug": "...", "date": "...", "tags": ["..."] } ] }
//! tools.json     { "categories": { "<slug>": { ... } },
//!                  "tools": [ { "slug": "...", "category": "<slug>" } ] }
//! ```
//!
//! Fields other than the ones above (titles, descriptions, icons) are ignored.

use crate::types::{BlogPostEntry, ToolCategoryEntry, ToolEntry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid catalog {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Source of blog posts.
pub trait ContentCatalog {
    fn list_blog_posts(&self) -> Vec<BlogPostEntry>;
}

/// Source of tool categories and tools.
pub trait ToolCatalog {
    fn list_categories(&self) -> Vec<ToolCategoryEntry>;
    fn list_tools(&self) -> Vec<ToolEntry>;
}

/// Blog content listing, deserialized from `content.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentManifest {
    #[serde(default)]
    pub posts: Vec<BlogPostEntry>,
}

impl ContentCatalog for ContentManifest {
    fn list_blog_posts(&self) -> Vec<BlogPostEntry> {
        self.posts.clone()
    }
}

/// Tool listing, deserialized from `tools.json`.
///
/// Category metadata is kept opaque; only the keys matter here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolManifest {
    #[serde(default)]
    pub categories: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
}

impl ToolCatalog for ToolManifest {
    /// Category keys in slug order.
    fn list_categories(&self) -> Vec<ToolCategoryEntry> {
        self.categories
            .keys()
            .map(|slug| ToolCategoryEntry { slug: slug.clone() })
            .collect()
    }

    fn list_tools(&self) -> Vec<ToolEntry> {
        self.tools.clone()
    }
}

impl ToolManifest {
    /// Tools whose category is not a key of `categories`.
    pub fn orphaned_tools(&self) -> Vec<&ToolEntry> {
        self.tools
            .iter()
            .filter(|t| !self.categories.contains_key(&t.category))
            .collect()
    }
}

/// Read and parse a JSON catalog, or return `T::default()` if the file is absent.
fn load_or_default<T>(path: &Path) -> Result<T, CatalogError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if !path.exists() {
        tracing::debug!(path = %path.display(), "catalog file missing, treating as empty");
        return Ok(T::default());
    }
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_content_catalog(path: &Path) -> Result<ContentManifest, CatalogError> {
    load_or_default(path)
}

pub fn load_tool_catalog(path: &Path) -> Result<ToolManifest, CatalogError> {
    load_or_default(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_files_are_empty_catalogs() {
        let tmp = TempDir::new().unwrap();
        let content = load_content_catalog(&tmp.path().join("content.json")).unwrap();
        let tools = load_tool_catalog(&tmp.path().join("tools.json")).unwrap();
        assert!(content.list_blog_posts().is_empty());
        assert!(tools.list_categories().is_empty());
        assert!(tools.list_tools().is_empty());
    }

    #[test]
    fn content_catalog_ignores_extra_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        fs::write(
            &path,
            r#"{"posts": [{"slug": "seo-basics", "title": "SEO Basics",
                "date": "2024-03-01", "tags": ["SEO"], "body": "..."}]}"#,
        )
        .unwrap();

        let posts = load_content_catalog(&path).unwrap().list_blog_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "seo-basics");
        assert_eq!(posts[0].tags, vec!["SEO"]);
    }

    #[test]
    fn tool_categories_come_from_map_keys() {
        let manifest: ToolManifest = serde_json::from_str(
            r#"{
                "categories": {"text": {"name": "Text"}, "encoding": {"name": "Encoding"}},
                "tools": [{"slug": "base64", "category": "encoding"}]
            }"#,
        )
        .unwrap();
        let slugs: Vec<String> = manifest
            .list_categories()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, vec!["encoding", "text"]);
        assert_eq!(manifest.list_tools()[0].slug, "base64");
    }

    #[test]
    fn orphaned_tools_reference_unknown_categories() {
        let manifest: ToolManifest = serde_json::from_str(
            r#"{
                "categories": {"text": {}},
                "tools": [
                    {"slug": "word-count", "category": "text"},
                    {"slug": "qr", "category": "images"}
                ]
            }"#,
        )
        .unwrap();
        let orphans = manifest.orphaned_tools();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].slug, "qr");
    }

    #[test]
    fn malformed_catalog_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tools.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_tool_catalog(&path),
            Err(CatalogError::Json { .. })
        ));
    }
}
