//! Failure classes a release run can end with.
//!
//! Everything else (I/O, transport, JSON) is propagated through `anyhow` with
//! context; these are the cases callers and tests match on.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    /// A required environment variable is unset or not valid UTF-8.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The changelog has no block with both a version heading and a bullet.
    #[error("no valid version found in {}", .0.display())]
    NoVersions(PathBuf),

    /// A version heading whose numeric part is not a dotted list of integers.
    #[error("invalid version '{0}' in changelog")]
    InvalidVersion(String),

    /// The release tag does not match the latest changelog version.
    #[error("release tag '{tag}' does not match version '{version}' from the changelog; expected tag '{expected}'")]
    TagMismatch {
        tag: String,
        version: String,
        expected: String,
    },

    /// The release exists but has no asset with the expected file name.
    #[error("release asset not found: {0}")]
    AssetNotFound(String),

    /// A request completed with a status outside 2xx.
    #[error("{method} {url} returned HTTP {code}")]
    HttpStatus {
        method: &'static str,
        url: String,
        code: u32,
    },
}
