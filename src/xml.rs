//! Sitemap XML serialization.
//!
//! Renders ordered records into a sitemaps.org protocol 0.9 document:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-06-01T12:00:00.000Z</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! Only `loc` is escaped. `lastmod`, `changefreq` and `priority` are produced
//! internally (a formatted timestamp, an enum, a number) and cannot contain
//! markup characters.

use crate::types::SitemapUrlRecord;
use std::fmt::Write;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Escape the five XML-significant characters.
///
/// `&` is replaced first so the entities introduced by the other
/// substitutions are not escaped again.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format a priority at its configured precision, always with at least one
/// decimal: `1.0`, `0.8`, `0.75`.
///
/// Never rounds. Records are sorted on the exact value and the rendered
/// order has to agree with it.
pub fn format_priority(priority: f32) -> String {
    // -0.0 passes config validation but must not render as `-0.0`.
    let priority = if priority == 0.0 { 0.0 } else { priority };
    let text = priority.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Render the complete sitemap document. Record order is kept as given.
pub fn render_sitemap(records: &[SitemapUrlRecord]) -> String {
    let mut xml = String::with_capacity(128 + records.len() * 160);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    let _ = writeln!(xml, r#"<urlset xmlns="{}">"#, SITEMAP_NAMESPACE);
    for record in records {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(record.loc()));
        let _ = writeln!(xml, "    <lastmod>{}</lastmod>", record.lastmod());
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", record.changefreq());
        let _ = writeln!(
            xml,
            "    <priority>{}</priority>",
            format_priority(record.priority())
        );
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}
