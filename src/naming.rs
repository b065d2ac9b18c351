//! Slug derivation for blog tags.
//!
//! Blog categories have no catalog of their own; they are derived from the
//! tags on every post. A tag becomes a slug by lower-casing it and collapsing
//! each run of whitespace (Unicode spaces and U+FEFF, but not U+0085) into a
//! single `-`:
//!
//! - `"Link Building"` → `"link-building"`
//! - `"SEO"` → `"seo"`
//! - `"  Web \t Tools "` → `"-web-tools-"`
//!
//! Leading and trailing whitespace is not trimmed, it becomes a hyphen like
//! any other run. Characters that are not URL-safe are left alone here; the
//! validation gate strips them later.

use crate::types::BlogPostEntry;
use std::collections::BTreeSet;

/// Separator set for tags: Unicode `White_Space` plus the byte-order mark
/// U+FEFF, minus NEL U+0085.
fn is_tag_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Turn a human-readable tag into a URL slug.
pub fn slugify(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    let mut in_whitespace = false;
    for c in tag.chars() {
        if is_tag_space(c) {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    slug
}

/// Collect the unique category slugs across all posts.
///
/// Tags that slugify to nothing (empty strings) are skipped.
pub fn derive_blog_categories(posts: &[BlogPostEntry]) -> BTreeSet<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter())
        .map(|tag| slugify(tag))
        .filter(|slug| !slug.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, tags: &[&str]) -> BlogPostEntry {
        BlogPostEntry {
            slug: slug.to_string(),
            date: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Link Building"), "link-building");
        assert_eq!(slugify("SEO"), "seo");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("Web \t  Tools"), "web-tools");
        assert_eq!(slugify("a\nb"), "a-b");
    }

    #[test]
    fn unicode_spaces_separate_words() {
        assert_eq!(slugify("Web\u{a0}Tools"), "web-tools");
        assert_eq!(slugify("Web\u{3000}Tools"), "web-tools");
        assert_eq!(slugify("\u{feff}SEO"), "-seo");
        assert_eq!(slugify("a\u{feff} b"), "a-b");
    }

    #[test]
    fn next_line_is_not_a_separator() {
        assert_eq!(slugify("a\u{85}b"), "a\u{85}b");
    }

    #[test]
    fn edge_whitespace_becomes_hyphen() {
        assert_eq!(slugify(" padded "), "-padded-");
    }

    #[test]
    fn keeps_other_characters() {
        assert_eq!(slugify("C++ & Rust"), "c++-&-rust");
    }

    #[test]
    fn empty_tag_is_empty_slug() {
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn derives_exactly_the_tag_slugs() {
        let posts = vec![post("a", &["Link Building", "SEO"])];
        let slugs = derive_blog_categories(&posts);
        assert_eq!(
            slugs.into_iter().collect::<Vec<_>>(),
            vec!["link-building", "seo"]
        );
    }

    #[test]
    fn dedupes_across_posts_and_case() {
        let posts = vec![
            post("a", &["SEO", "Tools"]),
            post("b", &["seo", "Link  Building"]),
            post("c", &["link building"]),
        ];
        let slugs = derive_blog_categories(&posts);
        assert_eq!(slugs.len(), 3);
        assert!(slugs.contains("seo"));
        assert!(slugs.contains("tools"));
        assert!(slugs.contains("link-building"));
    }

    #[test]
    fn skips_empty_tags() {
        let posts = vec![post("a", &["", "seo"])];
        assert_eq!(derive_blog_categories(&posts).len(), 1);
    }

    #[test]
    fn no_posts_no_categories() {
        assert!(derive_blog_categories(&[]).is_empty());
    }
}
