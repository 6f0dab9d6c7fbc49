//! Markdown changelog parsing.
//!
//! The changelog is a markdown file with one `## <version>` heading per release,
//! each followed by `- ` bullet lines:
//!
//! ```text
//! # Changelog
//!
//! ## 1.2.0
//! - Added presets
//! - Fixed hotkey capture
//!
//! ## 1.1.0
//! - First public build
//! ```

pub mod version;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ReleaseError;
pub use version::{ParsedVersion, PrereleaseStage};

/// One release block: the heading text and its bullet lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub version: String,
    pub bullets: Vec<String>,
}

/// Returns the heading text of a `## ` line. `###` and deeper do not count.
fn heading_version(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

fn push_complete(entries: &mut Vec<ChangelogEntry>, version: String, bullets: Vec<String>) {
    if !version.is_empty() && !bullets.is_empty() {
        entries.push(ChangelogEntry { version, bullets });
    }
}

/// Parses changelog text into entries in document order.
///
/// Text before the first heading is ignored. Blocks without a version or
/// without at least one bullet are dropped.
pub fn parse_changelog(text: &str) -> Vec<ChangelogEntry> {
    let mut entries = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        if let Some(version) = heading_version(line) {
            if let Some((v, b)) = current.take() {
                push_complete(&mut entries, v, b);
            }
            current = Some((version.to_string(), Vec::new()));
            continue;
        }
        if let Some((_, bullets)) = current.as_mut() {
            if let Some(bullet) = line.trim().strip_prefix("- ") {
                bullets.push(bullet.to_string());
            }
        }
    }
    if let Some((v, b)) = current {
        push_complete(&mut entries, v, b);
    }

    entries
}

/// Picks the entry with the highest version. On equal versions the one that
/// appears first in the document wins.
pub fn latest_entry(entries: &[ChangelogEntry]) -> Result<Option<&ChangelogEntry>, ReleaseError> {
    let mut best: Option<(ParsedVersion, &ChangelogEntry)> = None;
    for entry in entries {
        let key = ParsedVersion::parse(&entry.version)?;
        let replace = best.as_ref().map_or(true, |(k, _)| key > *k);
        if replace {
            best = Some((key, entry));
        }
    }
    Ok(best.map(|(_, e)| e))
}

/// Reads and parses a UTF-8 changelog file.
pub fn load_changelog(path: &Path) -> Result<Vec<ChangelogEntry>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read changelog {}", path.display()))?;
    Ok(parse_changelog(&text))
}

/// Reads the changelog at `path` and returns its latest entry.
pub fn load_latest(path: &Path) -> Result<ChangelogEntry> {
    let entries = load_changelog(path)?;
    tracing::debug!("parsed {} changelog block(s) from {}", entries.len(), path.display());
    let latest = latest_entry(&entries)?
        .cloned()
        .ok_or_else(|| ReleaseError::NoVersions(path.to_path_buf()))?;
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Changelog\n\n## 1.1.0\n- z\n\n## 1.2.0\n- x\n- y\n";

    #[test]
    fn parse_keeps_document_order() {
        let entries = parse_changelog(SAMPLE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].version, "1.1.0");
        assert_eq!(entries[0].bullets, vec!["z"]);
        assert_eq!(entries[1].version, "1.2.0");
        assert_eq!(entries[1].bullets, vec!["x", "y"]);
    }

    #[test]
    fn latest_is_highest_version() {
        let text = "## 1.2.0\n- x\n- y\n\n## 1.1.0\n- z\n";
        let entries = parse_changelog(text);
        let latest = latest_entry(&entries).unwrap().unwrap();
        assert_eq!(latest.version, "1.2.0");
        assert_eq!(latest.bullets, vec!["x", "y"]);

        let reordered = parse_changelog(SAMPLE);
        assert_eq!(latest_entry(&reordered).unwrap().unwrap().version, "1.2.0");
    }

    #[test]
    fn heading_without_bullets_is_excluded() {
        let text = "## 2.0.0\nNothing yet.\n\n## 1.0.0\n- initial\n";
        let entries = parse_changelog(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].version, "1.0.0");
    }

    #[test]
    fn preamble_bullets_are_ignored() {
        let text = "# Notes\n- not a release\n\n## 0.1.0\n- first\n";
        let entries = parse_changelog(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].bullets, vec!["first"]);
    }

    #[test]
    fn bullets_are_trimmed_and_non_ascii_kept() {
        let text = "##   1.0.0-beta11  \r\n  - 新增预设功能\r\n-  two spaces\r\n* star\r\n-\r\n";
        let entries = parse_changelog(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].version, "1.0.0-beta11");
        assert_eq!(entries[0].bullets, vec!["新增预设功能", " two spaces"]);
    }

    #[test]
    fn deeper_headings_do_not_start_blocks() {
        let text = "## 1.0.0\n### Fixed\n- a\n#### Misc\n- b\n";
        let entries = parse_changelog(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].bullets, vec!["a", "b"]);
    }

    #[test]
    fn prerelease_ordering_picks_final() {
        let text = "## 1.0.0-rc2\n- rc\n## 1.0.0\n- final\n## 1.0.0-beta9\n- beta\n";
        let entries = parse_changelog(text);
        assert_eq!(latest_entry(&entries).unwrap().unwrap().version, "1.0.0");
    }

    #[test]
    fn equal_versions_keep_first() {
        let text = "## 1.0.0\n- first\n## 1.0.0\n- second\n";
        let entries = parse_changelog(text);
        let latest = latest_entry(&entries).unwrap().unwrap();
        assert_eq!(latest.bullets, vec!["first"]);
    }

    #[test]
    fn invalid_version_is_error() {
        let entries = parse_changelog("## Unreleased\n- wip\n## 1.0.0\n- a\n");
        let err = latest_entry(&entries).unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidVersion(_)));
    }

    #[test]
    fn empty_changelog_has_no_latest() {
        assert!(latest_entry(&parse_changelog("# Changelog\n")).unwrap().is_none());
    }

    #[test]
    fn load_latest_reports_no_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("version.md");
        fs::write(&path, "# Changelog\n\n## 1.0.0\n").unwrap();
        let err = load_latest(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReleaseError>(),
            Some(ReleaseError::NoVersions(_))
        ));
    }

    #[test]
    fn load_latest_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_latest(&dir.path().join("version.md")).unwrap_err();
        assert!(format!("{:#}", err).contains("read changelog"));
    }

    #[test]
    fn load_latest_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("version.md");
        fs::write(&path, SAMPLE).unwrap();
        let latest = load_latest(&path).unwrap();
        assert_eq!(latest.version, "1.2.0");
    }
}
