//! Deterministic ordering of accepted records.
//!
//! Output order must not depend on catalog order or platform, otherwise every
//! build churns the sitemap. Records are sorted by priority (highest first),
//! then by `loc` in byte order. Byte order on UTF-8 equals code-point order and
//! ignores locale.

use crate::types::SitemapUrlRecord;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Total order used for the sitemap: priority descending, then `loc` ascending.
pub fn sitemap_order(a: &SitemapUrlRecord, b: &SitemapUrlRecord) -> Ordering {
    b.priority()
        .total_cmp(&a.priority())
        .then_with(|| a.loc().cmp(b.loc()))
}

/// Sort in place. Records with the same priority and `loc` are all kept.
pub fn sort_records(records: &mut [SitemapUrlRecord]) {
    records.sort_by(sitemap_order);
}

/// Number of records whose `loc` already appeared earlier in the list.
pub fn count_duplicate_locs(records: &[SitemapUrlRecord]) -> usize {
    let mut seen = HashSet::new();
    records.iter().filter(|r| !seen.insert(r.loc())).count()
}

/// Drop every record whose `loc` already appeared earlier in the list.
///
/// Run on a sorted list this keeps the highest-priority entry for each URL.
pub fn collapse_duplicate_locs(records: Vec<SitemapUrlRecord>) -> Vec<SitemapUrlRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let first = seen.insert(r.loc().to_string());
            if !first {
                tracing::debug!(loc = r.loc(), source = ?r.source(), "dropping duplicate loc");
            }
            first
        })
        .collect()
}
