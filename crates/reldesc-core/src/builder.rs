//! The release descriptor pipeline.
//!
//! Runs strictly in order: changelog, tag check, release lookup, mirror probe,
//! checksum, output files. The tag check happens before any request is made,
//! and nothing is written until every earlier step has succeeded.

use anyhow::Result;
use chrono::Local;

use crate::changelog;
use crate::checksum;
use crate::config::{ReldescConfig, ReleaseEnv};
use crate::descriptor::{self, DownloadUrls, ReleaseDescriptor, WrittenFiles};
use crate::error::ReleaseError;
use crate::github::GithubClient;
use crate::mirror;

/// Release tags are the changelog version with a `v` prefix.
pub fn expected_tag(version: &str) -> String {
    format!("v{}", version)
}

/// Fails with [`ReleaseError::TagMismatch`] unless `tag` is `v<version>`.
pub fn validate_tag(tag: &str, version: &str) -> Result<(), ReleaseError> {
    let expected = expected_tag(version);
    if tag != expected {
        return Err(ReleaseError::TagMismatch {
            tag: tag.to_string(),
            version: version.to_string(),
            expected,
        });
    }
    Ok(())
}

pub struct ReleaseDescriptorBuilder {
    config: ReldescConfig,
    env: ReleaseEnv,
}

impl ReleaseDescriptorBuilder {
    pub fn new(config: ReldescConfig, env: ReleaseEnv) -> Self {
        Self { config, env }
    }

    /// Runs every step except writing files and returns the descriptor.
    pub fn build(&self) -> Result<ReleaseDescriptor> {
        let cfg = &self.config;
        let env = &self.env;

        let entry = changelog::load_latest(&cfg.changelog)?;
        tracing::info!(
            "latest changelog version {} ({} item(s))",
            entry.version,
            entry.bullets.len()
        );

        validate_tag(&env.tag, &entry.version)?;

        let client = GithubClient::new(&cfg.api_base, &env.token);
        let asset = client.locate_asset(&env.owner, &env.repo, &env.tag, &cfg.project_name)?;
        tracing::info!("release asset {} at {}", asset.name, asset.browser_download_url);

        let mirror = mirror::resolve_mirror(&asset.browser_download_url, &cfg.mirror, asset.size);

        let auth = client.authorization();
        let sha256 = checksum::sha256_url(&asset.browser_download_url, Some(auth.as_str()))?;
        tracing::info!("sha256 {}", sha256);

        let urls = DownloadUrls {
            primary: asset.browser_download_url,
            mirror,
        };
        Ok(ReleaseDescriptor::new(
            entry,
            Local::now().date_naive(),
            urls,
            sha256,
        ))
    }

    /// Builds the descriptor and writes `latest.json` and `CNAME`.
    pub fn run(&self) -> Result<(ReleaseDescriptor, WrittenFiles)> {
        let descriptor = self.build()?;
        let written =
            descriptor::write_outputs(&self.config.output_dir, &descriptor, &self.config.cname)?;
        tracing::info!("wrote {}", written.descriptor.display());
        if let Some(cname) = &written.cname {
            tracing::info!("wrote {}", cname.display());
        }
        Ok((descriptor, written))
    }
}
