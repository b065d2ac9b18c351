//! # Sitemap Gen
//!
//! Build-time generator for the site's `sitemap.xml`. The site is a catalog
//! of small browser tools plus a blog; this crate aggregates every public URL
//! into a single sitemaps.org document and writes it to both the public
//! serving directory and the distribution build.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Scan       config + catalogs  →  candidates      (raw URLs, per source)
//! 2. Validate   candidates         →  records         (sanitized, https, on origin)
//! 3. Order      records            →  records         (priority desc, loc asc)
//! 4. Render     records            →  XML string
//! 5. Write      XML                →  public/ + dist/ (staged, verified, committed)
//! 6. Report     stats              →  stdout
//! ```
//!
//! Stages 1–4 are pure functions of the config, the catalogs and the
//! generation timestamp, so a fixed timestamp gives byte-identical output.
//! Only stage 5 touches the filesystem, and it is the only stage that can fail
//! the run. Everything before it degrades softly: an empty catalog contributes
//! nothing and an invalid URL is dropped and counted.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `sitemap.toml` loading over stock defaults, validation |
//! | [`catalog`] | `ContentCatalog` / `ToolCatalog` interfaces and JSON-backed implementations |
//! | [`naming`] | Tag → slug derivation for blog categories |
//! | [`scan`] | Stage 1: source registry |
//! | [`validate`] | Stage 2: sanitize, validate, resolve `lastmod` |
//! | [`order`] | Stage 3: deterministic ordering and optional duplicate collapse |
//! | [`xml`] | Stage 4: escaping and document rendering |
//! | [`write`] | Stage 5: dual-target staged write with read-back verification |
//! | [`stats`] | Per-source counts, rejections, duplicates |
//! | [`generate`] | Runs the stages in order |
//! | [`output`] | CLI banners and stats formatting |
//! | [`types`] | Source entities, candidates, records |
//!
//! # Design Decisions
//!
//! ## One Gate for Every URL
//!
//! All sources funnel through [`validate::admit`], and
//! [`types::SitemapUrlRecord`] has no public constructor. A record that
//! exists is a record on the configured origin over https.
//!
//! ## Duplicates Are Kept by Default
//!
//! Two sources can produce the same URL (a tool category and a blog category
//! with the same slug under a shared route). Such entries are harmless to
//! crawlers, so they are kept and counted. Set `output.dedupe_locs = true` to
//! keep only the highest-priority entry per URL.
//!
//! ## Staged Dual Write
//!
//! Both targets are written to temporary siblings and verified before either
//! replaces the live file, so a failing second target does not leave the
//! first one updated on its own.

pub mod catalog;
pub mod config;
pub mod generate;
pub mod naming;
pub mod order;
pub mod output;
pub mod scan;
pub mod stats;
pub mod types;
pub mod validate;
pub mod write;
pub mod xml;

#[cfg(test)]
pub(crate) mod test_helpers;
