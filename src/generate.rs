//! Pipeline orchestration.
//!
//! ```text
//! scan → admit (sanitize + validate) → order → render → write → stats
//! ```
//!
//! [`build_sitemap`] runs everything up to rendering and does no I/O, so the
//! whole document can be tested in memory. [`generate`] adds the dual-target
//! write. The generation timestamp is a parameter: with the same catalogs,
//! config and timestamp, two runs produce byte-identical files.

use crate::catalog::{ContentCatalog, ToolCatalog};
use crate::config::{ConfigError, SitemapConfig};
use crate::order;
use crate::scan::scan;
use crate::stats::SitemapStats;
use crate::types::SitemapUrlRecord;
use crate::validate::{Admission, admit};
use crate::write::{WriteError, WrittenTarget, write_targets};
use crate::xml::render_sitemap;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// A rendered sitemap that has not been written anywhere yet.
#[derive(Debug, Clone)]
pub struct SitemapDocument {
    /// Records in document order.
    pub records: Vec<SitemapUrlRecord>,
    pub xml: String,
    pub stats: SitemapStats,
}

#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub document: SitemapDocument,
    pub written: Vec<WrittenTarget>,
}

/// Build the sitemap in memory.
pub fn build_sitemap(
    config: &SitemapConfig,
    content: &dyn ContentCatalog,
    tools: &dyn ToolCatalog,
    generated_at: DateTime<Utc>,
) -> Result<SitemapDocument, GenerateError> {
    let origin = config.origin_url()?;

    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for candidate in scan(config, content, tools) {
        match admit(candidate, &origin, generated_at) {
            Admission::Accepted(record) => records.push(record),
            Admission::Rejected(rejection) => rejected.push(rejection),
        }
    }

    order::sort_records(&mut records);
    let duplicate_locs = order::count_duplicate_locs(&records);
    if config.output.dedupe_locs && duplicate_locs > 0 {
        records = order::collapse_duplicate_locs(records);
    }

    let xml = render_sitemap(&records);
    let stats = SitemapStats::collect(&records, rejected, duplicate_locs);
    Ok(SitemapDocument {
        records,
        xml,
        stats,
    })
}

/// Build the sitemap and write it to every configured target.
pub fn generate(
    config: &SitemapConfig,
    content: &dyn ContentCatalog,
    tools: &dyn ToolCatalog,
    generated_at: DateTime<Utc>,
) -> Result<GenerateResult, GenerateError> {
    let document = build_sitemap(config, content, tools, generated_at)?;
    let written = write_targets(
        &document.xml,
        document.records.len(),
        &config.output.targets,
    )?;
    Ok(GenerateResult { document, written })
}
