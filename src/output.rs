//! CLI output formatting.
//!
//! Each report has a `format_*` function returning lines, which keeps it
//! testable, and a `print_*` wrapper that writes them out. Format functions
//! are pure.
//!
//! # Output Format
//!
//! ```text
//! ✓ Sitemap generated (21 URLs)
//!     public/sitemap.xml (4.1 KB)
//!     dist/sitemap.xml (4.1 KB)
//!
//! Sources
//!     static pages        8
//!     tool categories     3
//!     tools               5
//!     blog categories     3
//!     blog posts          2
//!     total              21
//!
//! Rejected 1 URL
//!     blog posts: https://evil.com/x (host 'evil.com' is not the site origin)
//! ```
//!
//! The rejected and duplicate sections only appear when non-empty. This is
//! human-readable output, not a stable machine format.

use crate::stats::SitemapStats;
use crate::types::SourceKind;
use crate::write::WrittenTarget;

const SOURCES: [SourceKind; 5] = [
    SourceKind::StaticPage,
    SourceKind::ToolCategory,
    SourceKind::Tool,
    SourceKind::BlogCategory,
    SourceKind::BlogPost,
];

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Human-readable byte size (`512 B`, `4.1 KB`, `1.2 MB`).
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{bytes} B")
    } else if b < KB * KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / (KB * KB))
    }
}

/// Success banner with the written targets.
pub fn format_success(stats: &SitemapStats, written: &[WrittenTarget]) -> Vec<String> {
    let mut lines = vec![format!(
        "\u{2713} Sitemap generated ({})",
        plural(stats.total, "URL", "URLs")
    )];
    for target in written {
        lines.push(format!(
            "    {} ({})",
            target.path.display(),
            format_size(target.bytes)
        ));
    }
    lines
}

/// Banner for `check`, where nothing is written.
pub fn format_check(stats: &SitemapStats, bytes: usize) -> Vec<String> {
    vec![format!(
        "\u{2713} Sitemap is valid ({}, {}), nothing written",
        plural(stats.total, "URL", "URLs"),
        format_size(bytes)
    )]
}

/// Failure banner. `error` is shown as-is.
pub fn format_failure(error: &dyn std::error::Error) -> Vec<String> {
    let mut lines = vec![format!("\u{2717} Sitemap generation failed: {error}")];
    let mut source = error.source();
    while let Some(cause) = source {
        lines.push(format!("    caused by: {cause}"));
        source = cause.source();
    }
    lines
}

/// Per-source counts, then rejections and duplicates if there are any.
pub fn format_stats(stats: &SitemapStats) -> Vec<String> {
    let mut lines = vec![String::new(), "Sources".to_string()];
    for source in SOURCES {
        lines.push(format!(
            "    {:<16}{:>4}",
            source.label(),
            stats.count(source)
        ));
    }
    lines.push(format!("    {:<16}{:>4}", "total", stats.total));

    if !stats.rejected.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Rejected {}",
            plural(stats.rejected.len(), "URL", "URLs")
        ));
        for rejection in &stats.rejected {
            lines.push(format!(
                "    {}: {} ({})",
                rejection.source.label(),
                rejection.url,
                rejection.reason
            ));
        }
    }

    if stats.duplicate_locs > 0 {
        lines.push(String::new());
        lines.push(format!(
            "Duplicate URLs: {}",
            plural(stats.duplicate_locs, "entry", "entries")
        ));
    }

    lines
}

pub fn print_success(stats: &SitemapStats, written: &[WrittenTarget]) {
    for line in format_success(stats, written) {
        println!("{}", line);
    }
}

pub fn print_check(stats: &SitemapStats, bytes: usize) {
    for line in format_check(stats, bytes) {
        println!("{}", line);
    }
}

/// Failures go to stderr.
pub fn print_failure(error: &dyn std::error::Error) {
    for line in format_failure(error) {
        eprintln!("{}", line);
    }
}

pub fn print_stats(stats: &SitemapStats) {
    for line in format_stats(stats) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{RejectReason, Rejection};
    use crate::write::WriteError;
    use std::path::PathBuf;

    fn stats() -> SitemapStats {
        SitemapStats {
            total: 21,
            static_pages: 8,
            tool_categories: 3,
            tools: 5,
            blog_categories: 3,
            blog_posts: 2,
            rejected: vec![],
            duplicate_locs: 0,
        }
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(4200), "4.1 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "URL", "URLs"), "1 URL");
        assert_eq!(plural(0, "URL", "URLs"), "0 URLs");
    }

    #[test]
    fn success_lists_targets() {
        let written = vec![
            WrittenTarget {
                path: PathBuf::from("public/sitemap.xml"),
                bytes: 4200,
                digest: String::new(),
            },
            WrittenTarget {
                path: PathBuf::from("dist/sitemap.xml"),
                bytes: 4200,
                digest: String::new(),
            },
        ];
        let lines = format_success(&stats(), &written);
        assert_eq!(lines[0], "\u{2713} Sitemap generated (21 URLs)");
        assert_eq!(lines[1], "    public/sitemap.xml (4.1 KB)");
        assert_eq!(lines[2], "    dist/sitemap.xml (4.1 KB)");
    }

    #[test]
    fn stats_lists_every_source_and_total() {
        let lines = format_stats(&stats());
        assert!(lines.contains(&"    static pages       8".to_string()));
        assert!(lines.contains(&"    tool categories    3".to_string()));
        assert!(lines.contains(&"    tools              5".to_string()));
        assert!(lines.contains(&"    blog categories    3".to_string()));
        assert!(lines.contains(&"    blog posts         2".to_string()));
        assert!(lines.contains(&"    total             21".to_string()));
    }

    #[test]
    fn stats_omits_empty_sections() {
        let lines = format_stats(&stats());
        assert!(!lines.iter().any(|l| l.starts_with("Rejected")));
        assert!(!lines.iter().any(|l| l.starts_with("Duplicate")));
    }

    #[test]
    fn stats_shows_rejections_with_reason() {
        let mut s = stats();
        s.rejected.push(Rejection {
            source: SourceKind::BlogPost,
            url: "https://evil.com/x".to_string(),
            reason: RejectReason::ForeignHost("evil.com".to_string()),
        });
        s.duplicate_locs = 2;
        let lines = format_stats(&s);
        assert!(lines.contains(&"Rejected 1 URL".to_string()));
        assert!(lines.contains(
            &"    blog posts: https://evil.com/x (host 'evil.com' is not the site origin)"
                .to_string()
        ));
        assert!(lines.contains(&"Duplicate URLs: 2 entries".to_string()));
    }

    #[test]
    fn failure_includes_cause_chain() {
        let err = WriteError::Io {
            path: PathBuf::from("dist/sitemap.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let lines = format_failure(&err);
        assert!(lines[0].starts_with("\u{2717} Sitemap generation failed: failed to write"));
        assert_eq!(lines[1], "    caused by: denied");
    }

    #[test]
    fn check_banner_mentions_nothing_written() {
        let lines = format_check(&stats(), 100);
        assert_eq!(
            lines,
            vec!["\u{2713} Sitemap is valid (21 URLs, 100 B), nothing written"]
        );
    }
}
