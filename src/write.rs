//! Dual-target writer with round-trip verification.
//!
//! Stage 5 of the sitemap pipeline. The same bytes go to every configured
//! target (normally `public/sitemap.xml` and `dist/sitemap.xml`), and no target
//! is reported as written until it has been read back and checked.
//!
//! # Staged commit
//!
//! Writing targets one after the other risks leaving a fresh file next to a
//! stale or missing one when the second write fails. Instead:
//!
//! 1. For each target, create its directory and write `.<name>.tmp` next to it.
//! 2. Read every staged file back and verify it (see below).
//! 3. Only when all of them pass, rename each staged file over its target.
//! 4. Read each committed target back once more and compare digests.
//!
//! A failure in steps 1–2 removes the staged files and leaves existing
//! targets untouched. A rename can still fail halfway through step 3; that is
//! reported as a write failure like any other.
//!
//! # Verification
//!
//! A file passes when it contains the `<?xml` declaration marker, its SHA-256
//! digest equals the digest of the rendered document, and it re-parses as
//! well-formed XML with a `<urlset>` root holding the expected number of
//! `<url>` elements.
//!
//! Every failure here is fatal for the run.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("generated sitemap file is invalid ({path}): {reason}")]
    Verification { path: PathBuf, reason: String },
}

/// A target that was written and verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTarget {
    pub path: PathBuf,
    pub bytes: usize,
    /// Hex SHA-256 of the file contents.
    pub digest: String,
}

/// Marker every written file must contain.
const XML_MARKER: &str = "<?xml";

/// SHA-256 of `bytes` as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Sibling path a target is staged at before commit.
pub fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sitemap.xml".to_string());
    target.with_file_name(format!(".{name}.tmp"))
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> WriteError + '_ {
    move |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `document` to every target, verify, and commit.
///
/// `expected_urls` is the number of `<url>` entries the document holds.
pub fn write_targets(
    document: &str,
    expected_urls: usize,
    targets: &[PathBuf],
) -> Result<Vec<WrittenTarget>, WriteError> {
    let digest = sha256_hex(document.as_bytes());
    let expected = Expected {
        digest: &digest,
        urls: expected_urls,
    };

    let mut staged = Vec::with_capacity(targets.len());
    if let Err(e) = stage_all(document, &expected, targets, &mut staged) {
        discard(&staged);
        return Err(e);
    }

    for (i, (staging, target)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(staging, target) {
            discard(&staged[i..]);
            return Err(WriteError::Io {
                path: target.clone(),
                source,
            });
        }
    }

    let mut written = Vec::with_capacity(targets.len());
    for target in targets {
        verify_file(target, &expected)?;
        tracing::info!(path = %target.display(), bytes = document.len(), "sitemap written");
        written.push(WrittenTarget {
            path: target.clone(),
            bytes: document.len(),
            digest: digest.clone(),
        });
    }
    Ok(written)
}

struct Expected<'a> {
    digest: &'a str,
    urls: usize,
}

fn stage_all(
    document: &str,
    expected: &Expected<'_>,
    targets: &[PathBuf],
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<(), WriteError> {
    for target in targets {
        if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_error(dir))?;
        }
        let staging = staging_path(target);
        fs::write(&staging, document).map_err(io_error(&staging))?;
        staged.push((staging, target.clone()));
    }
    for (staging, _) in staged.iter() {
        verify_file(staging, expected)?;
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        if let Err(e) = fs::remove_file(staging) {
            tracing::debug!(path = %staging.display(), error = %e, "could not remove staged file");
        }
    }
}

/// Read a written file back and check it against the rendered document.
fn verify_file(path: &Path, expected: &Expected<'_>) -> Result<(), WriteError> {
    let bytes = fs::read(path).map_err(io_error(path))?;
    let invalid = |reason: String| WriteError::Verification {
        path: path.to_path_buf(),
        reason,
    };

    let content =
        std::str::from_utf8(&bytes).map_err(|e| invalid(format!("not valid UTF-8: {e}")))?;
    if !content.contains(XML_MARKER) {
        return Err(invalid("missing XML declaration".into()));
    }
    if sha256_hex(&bytes) != expected.digest {
        return Err(invalid("contents differ from the generated document".into()));
    }
    let urls = count_url_entries(content).map_err(invalid)?;
    if urls != expected.urls {
        return Err(invalid(format!(
            "expected {} <url> entries, found {}",
            expected.urls, urls
        )));
    }
    Ok(())
}

/// Parse a sitemap and count its `<url>` elements.
///
/// Fails on malformed XML, unbalanced tags, or a root other than `<urlset>`.
pub fn count_url_entries(xml: &str) -> Result<usize, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut urls = 0;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if depth == 0 {
                    if saw_root || name.as_ref() != b"urlset" {
                        return Err("root element must be a single <urlset>".into());
                    }
                    saw_root = true;
                } else if depth == 1 && name.as_ref() == b"url" {
                    urls += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "malformed XML near byte {}: {e}",
                    reader.buffer_position()
                ));
            }
        }
    }
    if !saw_root {
        return Err("missing <urlset> root".into());
    }
    if depth != 0 {
        return Err("document ends inside an open element".into());
    }
    Ok(urls)
}
