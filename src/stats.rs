//! Per-run statistics for the operator.
//!
//! Computed after the record set is final. Nothing here feeds back into the
//! document.

use crate::types::{SitemapUrlRecord, SourceKind};
use crate::validate::Rejection;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitemapStats {
    /// Records in the written document.
    pub total: usize,
    pub static_pages: usize,
    pub tool_categories: usize,
    pub tools: usize,
    pub blog_categories: usize,
    pub blog_posts: usize,
    /// Candidates dropped by the validation gate.
    pub rejected: Vec<Rejection>,
    /// Records sharing a `loc` with an earlier record. When duplicates are
    /// collapsed this is the number that were dropped.
    pub duplicate_locs: usize,
}

impl SitemapStats {
    pub fn collect(
        records: &[SitemapUrlRecord],
        rejected: Vec<Rejection>,
        duplicate_locs: usize,
    ) -> Self {
        let mut stats = Self {
            total: records.len(),
            rejected,
            duplicate_locs,
            ..Self::default()
        };
        for record in records {
            *stats.count_mut(record.source()) += 1;
        }
        stats
    }

    fn count_mut(&mut self, source: SourceKind) -> &mut usize {
        match source {
            SourceKind::StaticPage => &mut self.static_pages,
            SourceKind::ToolCategory => &mut self.tool_categories,
            SourceKind::Tool => &mut self.tools,
            SourceKind::BlogCategory => &mut self.blog_categories,
            SourceKind::BlogPost => &mut self.blog_posts,
        }
    }

    pub fn count(&self, source: SourceKind) -> usize {
        match source {
            SourceKind::StaticPage => self.static_pages,
            SourceKind::ToolCategory => self.tool_categories,
            SourceKind::Tool => self.tools,
            SourceKind::BlogCategory => self.blog_categories,
            SourceKind::BlogPost => self.blog_posts,
        }
    }
}
