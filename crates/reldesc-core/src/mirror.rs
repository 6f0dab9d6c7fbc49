//! Mirror URL derivation and the best-effort availability probe.
//!
//! The mirror hosts the same release files under the same path layout, so its
//! URL is the primary URL with the host/user fragment swapped. A mirror that
//! cannot be confirmed is left out; it never fails the run.

use std::time::Duration;

use crate::config::MirrorConfig;
use crate::fetch_head::{self, ProbeOptions};

/// Replaces every occurrence of `source` in `primary` with `target`.
///
/// Returns None when `source` is empty or absent from `primary`, since the
/// result would just be the primary URL again.
pub fn derive_mirror_url(primary: &str, source: &str, target: &str) -> Option<String> {
    if source.is_empty() || !primary.contains(source) {
        return None;
    }
    Some(primary.replace(source, target))
}

/// True only if a HEAD request to `url` completes with status 200.
///
/// `expected_size` is the asset size from the release API; a differing
/// `Content-Length` is logged but does not make the mirror unavailable.
pub fn probe_mirror(url: &str, opts: ProbeOptions, expected_size: Option<u64>) -> bool {
    match fetch_head::probe(url, &[], opts) {
        Ok(head) if head.status == 200 => {
            if let (Some(expected), Some(actual)) = (expected_size, head.content_length) {
                if expected != actual {
                    tracing::warn!(
                        "mirror asset {} is {} bytes, release asset is {} bytes",
                        url,
                        actual,
                        expected
                    );
                }
            }
            true
        }
        Ok(head) => {
            tracing::warn!("mirror asset not available: {} (HTTP {})", url, head.status);
            false
        }
        Err(e) => {
            tracing::warn!("mirror asset not available: {} ({:#})", url, e);
            false
        }
    }
}

/// Derives and probes the mirror URL for `primary` according to `cfg`.
pub fn resolve_mirror(
    primary: &str,
    cfg: &MirrorConfig,
    expected_size: Option<u64>,
) -> Option<String> {
    if !cfg.enabled {
        tracing::debug!("mirror disabled in config");
        return None;
    }
    let Some(url) = derive_mirror_url(primary, &cfg.source, &cfg.target) else {
        tracing::warn!(
            "download URL {} does not contain '{}'; no mirror URL derived",
            primary,
            cfg.source
        );
        return None;
    };
    let opts = ProbeOptions {
        timeout: Duration::from_secs(cfg.probe_timeout_secs),
        follow_redirects: cfg.follow_redirects,
    };
    if probe_mirror(&url, opts, expected_size) {
        tracing::info!("mirror available: {}", url);
        Some(url)
    } else {
        None
    }
}
