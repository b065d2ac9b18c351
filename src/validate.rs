//! URL sanitization and validation.
//!
//! Stage 2 of the sitemap pipeline and the only way a [`SitemapUrlRecord`] can
//! be created. Every candidate, whatever its source, goes through [`admit`]:
//!
//! 1. **Sanitize**: drop every character outside the URI character class
//!    (ASCII letters, digits, ``-._~:/?#[]@!$&'()*+,;=%``). Well-formed URLs pass
//!    through unchanged; a stray symbol in a blog tag is removed instead of
//!    sinking the whole entry.
//! 2. **Validate**: parse the result as an absolute URL and require scheme
//!    `https`, the origin's host and port, and no userinfo. The record keeps
//!    the normalized URL, so `HTTPS://EXAMPLE.COM/a` is listed as
//!    `https://example.com/a`.
//! 3. **Resolve lastmod**: a parseable post date, else the generation time.
//!
//! Failures are soft. A rejected candidate becomes [`Admission::Rejected`],
//! which the stats reporter counts; it never fails the run.

use crate::types::{Candidate, SitemapUrlRecord, SourceKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use thiserror::Error;
use url::Url;

/// Why a candidate URL was dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("not an absolute URL ({0})")]
    Unparseable(String),
    #[error("scheme '{0}' is not https")]
    InsecureScheme(String),
    #[error("host '{0}' is not the site origin")]
    ForeignHost(String),
    #[error("URL carries credentials ({0}@)")]
    Credentials(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub source: SourceKind,
    /// The URL as proposed, before sanitizing.
    pub url: String,
    pub reason: RejectReason,
}

/// Outcome of running one candidate through the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Accepted(SitemapUrlRecord),
    Rejected(Rejection),
}

fn is_uri_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c)
}

/// Remove every character that is not allowed in a URI.
pub fn sanitize_url(raw: &str) -> String {
    raw.chars().filter(|&c| is_uri_char(c)).collect()
}

/// Accept `candidate` iff it parses as an https URL on `origin`.
///
/// Scheme, host and port must all match the origin, and userinfo is refused
/// outright: `https://evil.com@example.com/` reads like another site.
pub fn validate_url(candidate: &str, origin: &Url) -> Result<Url, RejectReason> {
    let url = Url::parse(candidate).map_err(|e| RejectReason::Unparseable(e.to_string()))?;
    if url.scheme() != "https" {
        return Err(RejectReason::InsecureScheme(url.scheme().to_string()));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(RejectReason::Credentials(url.username().to_string()));
    }
    if url.origin() != origin.origin() {
        let host = url.host_str().unwrap_or_default();
        let shown = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        return Err(RejectReason::ForeignHost(shown));
    }
    Ok(url)
}

/// Run one candidate through sanitize → validate → lastmod resolution.
pub fn admit(candidate: Candidate, origin: &Url, generated_at: DateTime<Utc>) -> Admission {
    let url = match validate_url(&sanitize_url(&candidate.url), origin) {
        Ok(url) => url,
        Err(reason) => {
            tracing::debug!(url = %candidate.url, source = ?candidate.source, %reason, "rejected");
            return Admission::Rejected(Rejection {
                source: candidate.source,
                url: candidate.url,
                reason,
            });
        }
    };
    let lastmod = resolve_lastmod(candidate.lastmod.as_deref(), generated_at);
    // The parsed form: lowercase scheme and host, dot segments resolved.
    Admission::Accepted(SitemapUrlRecord::new(
        String::from(url),
        lastmod,
        candidate.changefreq,
        candidate.priority,
        candidate.source,
    ))
}

/// Format a timestamp the way `<lastmod>` carries it: UTC with milliseconds.
pub fn format_lastmod(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Date-only layouts seen in post front matter, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Parse a free-form post date. Date-only values are taken at UTC midnight.
pub fn parse_post_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// `lastmod` for a record: the post date if it parses, else the generation time.
pub fn resolve_lastmod(raw: Option<&str>, generated_at: DateTime<Utc>) -> String {
    let at = raw.and_then(parse_post_date).unwrap_or(generated_at);
    format_lastmod(at)
}
