//! Source registry.
//!
//! Stage 1 of the sitemap pipeline. Pulls every source into one flat list of
//! [`Candidate`]s before anything is filtered:
//!
//! ```text
//! config.static_pages          → StaticPage     <origin><path> (or an absolute URL)
//! ToolCatalog::list_categories → ToolCategory   <origin><routes.tool_category>/<slug>
//! ToolCatalog::list_tools      → Tool           <origin><routes.tool>/<slug>
//! tags of every post (slugs)   → BlogCategory   <origin><routes.blog_category>/<slug>
//! ContentCatalog::list_blog_posts → BlogPost    <origin><routes.blog_post>/<slug>
//! ```
//!
//! There are no error conditions here. An empty catalog just contributes no
//! candidates, and malformed slugs are left for the validation gate.

use crate::catalog::{ContentCatalog, ToolCatalog};
use crate::config::{SitemapConfig, SourceSettings};
use crate::naming::derive_blog_categories;
use crate::types::{Candidate, SourceKind};

/// Gather all candidate URLs from the config table and the catalogs.
pub fn scan(
    config: &SitemapConfig,
    content: &dyn ContentCatalog,
    tools: &dyn ToolCatalog,
) -> Vec<Candidate> {
    let origin = config.origin.trim_end_matches('/');
    let routes = &config.routes;
    let sources = &config.sources;
    let mut candidates = Vec::new();

    for page in &config.static_pages {
        candidates.push(Candidate {
            source: SourceKind::StaticPage,
            url: page_url(origin, &page.path),
            lastmod: None,
            changefreq: page.changefreq,
            priority: page.priority,
        });
    }

    for category in tools.list_categories() {
        candidates.push(derived(
            SourceKind::ToolCategory,
            route_url(origin, &routes.tool_category, &category.slug),
            &sources.tool_category,
        ));
    }

    for tool in tools.list_tools() {
        candidates.push(derived(
            SourceKind::Tool,
            route_url(origin, &routes.tool, &tool.slug),
            &sources.tool,
        ));
    }

    let posts = content.list_blog_posts();

    for slug in derive_blog_categories(&posts) {
        candidates.push(derived(
            SourceKind::BlogCategory,
            route_url(origin, &routes.blog_category, &slug),
            &sources.blog_category,
        ));
    }

    for post in posts {
        let mut candidate = derived(
            SourceKind::BlogPost,
            route_url(origin, &routes.blog_post, &post.slug),
            &sources.blog_post,
        );
        candidate.lastmod = Some(post.date);
        candidates.push(candidate);
    }

    candidates
}

fn derived(source: SourceKind, url: String, settings: &SourceSettings) -> Candidate {
    Candidate {
        source,
        url,
        lastmod: None,
        changefreq: settings.changefreq,
        priority: settings.priority,
    }
}

/// Static pages are usually site-relative; an absolute URL is taken as-is and
/// left for the gate to judge.
fn page_url(origin: &str, path: &str) -> String {
    if path.contains("://") {
        path.to_string()
    } else {
        join_path(origin, path)
    }
}

/// `origin` + `path`, with exactly one `/` between them.
///
/// The home page (`""` or `"/"`) maps to `<origin>/`.
fn join_path(origin: &str, path: &str) -> String {
    format!("{}/{}", origin, path.trim_start_matches('/'))
}

fn route_url(origin: &str, route: &str, slug: &str) -> String {
    let prefix = route.trim_matches('/');
    if prefix.is_empty() {
        join_path(origin, slug)
    } else {
        format!("{}/{}/{}", origin, prefix, slug)
    }
}
