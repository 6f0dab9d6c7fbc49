//! GitHub release lookup: fetch a release by tag and find its zip asset.

mod types;

pub use types::{GithubAsset, GithubRelease};

use anyhow::{Context, Result};
use url::Url;

use crate::error::ReleaseError;
use crate::http;

/// Media type requested from the REST API.
pub const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Name of the release asset for `tag`: `<project>-<tag>.zip`.
pub fn asset_file_name(project: &str, tag: &str) -> String {
    format!("{}-{}.zip", project, tag)
}

/// Finds the asset whose name matches exactly.
pub fn find_asset<'a>(release: &'a GithubRelease, name: &str) -> Option<&'a GithubAsset> {
    release.assets.iter().find(|a| a.name == name)
}

/// Token-authenticated client for the release endpoints.
pub struct GithubClient {
    api_base: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            api_base: api_base.to_string(),
            token: token.to_string(),
        }
    }

    /// `Authorization` header value for this client's token.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Endpoint URL for a release by tag, with each path segment escaped.
    pub fn release_url(&self, owner: &str, repo: &str, tag: &str) -> Result<String> {
        let mut url = Url::parse(&self.api_base)
            .with_context(|| format!("invalid API base URL {}", self.api_base))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API base URL {} cannot take a path", self.api_base))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "releases", "tags", tag]);
        Ok(url.to_string())
    }

    /// Fetches release metadata for `tag`. A non-2xx answer (e.g. 404 for an
    /// unknown tag) is an error.
    pub fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<GithubRelease> {
        let url = self.release_url(owner, repo, tag)?;
        tracing::debug!("fetching release metadata from {}", url);
        let auth = self.authorization();
        let body = http::get_bytes(&url, &[("Authorization", auth.as_str()), ("Accept", ACCEPT_JSON)])
            .context("fetch release metadata")?;
        let release: GithubRelease = serde_json::from_slice(&body)
            .with_context(|| format!("parse release metadata from {}", url))?;
        tracing::debug!(
            "release {} has {} asset(s)",
            release.tag_name,
            release.assets.len()
        );
        Ok(release)
    }

    /// Fetches the release for `tag` and returns the `<project>-<tag>.zip` asset.
    pub fn locate_asset(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        project: &str,
    ) -> Result<GithubAsset> {
        let release = self.release_by_tag(owner, repo, tag)?;
        let name = asset_file_name(project, tag);
        match find_asset(&release, &name) {
            Some(asset) => Ok(asset.clone()),
            None => Err(ReleaseError::AssetNotFound(name).into()),
        }
    }
}
