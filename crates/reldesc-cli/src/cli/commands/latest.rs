//! `reldesc latest` – show the newest changelog entry.

use anyhow::Result;
use reldesc_core::changelog;
use reldesc_core::changelog::ChangelogEntry;
use std::path::Path;

/// Text printed for an entry: the bare version, or the entry as pretty JSON.
pub(crate) fn render(entry: &ChangelogEntry, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(entry)?)
    } else {
        Ok(entry.version.clone())
    }
}

pub fn run_latest(path: &Path, json: bool) -> Result<()> {
    let entry = changelog::load_latest(path)?;
    println!("{}", render(&entry, json)?);
    Ok(())
}
