//! The `latest.json` release descriptor and the files written next to it.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::changelog::ChangelogEntry;

/// Descriptor file name inside the output directory.
pub const DESCRIPTOR_FILE: &str = "latest.json";
/// Static-hosting domain file name inside the output directory.
pub const CNAME_FILE: &str = "CNAME";

/// Download locations. The JSON keys are the ones update clients read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadUrls {
    #[serde(rename = "github")]
    pub primary: String,
    #[serde(rename = "gitee", default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<String>,
}

/// Contents of `latest.json`.
///
/// `download_url` duplicates `download_urls.primary` for clients that predate
/// the mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDescriptor {
    pub version: String,
    /// `YYYY-MM-DD`.
    pub release_date: String,
    pub download_url: String,
    pub download_urls: DownloadUrls,
    pub changelog: Vec<String>,
    pub sha256: String,
}

impl ReleaseDescriptor {
    pub fn new(entry: ChangelogEntry, date: NaiveDate, urls: DownloadUrls, sha256: String) -> Self {
        Self {
            version: entry.version,
            release_date: date.format("%Y-%m-%d").to_string(),
            download_url: urls.primary.clone(),
            download_urls: urls,
            changelog: entry.bullets,
            sha256,
        }
    }

    /// Two-space indented JSON; non-ASCII text is kept as is, not escaped.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Paths produced by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub descriptor: PathBuf,
    pub cname: Option<PathBuf>,
}

/// Writes `latest.json` and, unless `cname` is empty, `CNAME` into `dir`,
/// creating the directory if needed.
pub fn write_outputs(
    dir: &Path,
    descriptor: &ReleaseDescriptor,
    cname: &str,
) -> Result<WrittenFiles> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;

    let descriptor_path = dir.join(DESCRIPTOR_FILE);
    fs::write(&descriptor_path, descriptor.to_json()?)
        .with_context(|| format!("write {}", descriptor_path.display()))?;

    let cname_path = if cname.is_empty() {
        None
    } else {
        let path = dir.join(CNAME_FILE);
        fs::write(&path, cname).with_context(|| format!("write {}", path.display()))?;
        Some(path)
    };

    Ok(WrittenFiles {
        descriptor: descriptor_path,
        cname: cname_path,
    })
}

/// Reads back a descriptor written by [`write_outputs`].
pub fn read_descriptor(path: &Path) -> Result<ReleaseDescriptor> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let descriptor =
        serde_json::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(descriptor)
}
