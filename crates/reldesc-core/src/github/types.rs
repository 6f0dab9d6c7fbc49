//! The part of the GitHub release API response that is consumed.

use serde::Deserialize;

/// Release metadata from `GET /repos/{owner}/{repo}/releases/tags/{tag}`.
#[derive(Deserialize, Debug, Clone)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

/// Release asset.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
    /// Size in bytes as reported by the API.
    #[serde(default)]
    pub size: Option<u64>,
}
