use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReleaseError;

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable holding the repository owner.
pub const ENV_OWNER: &str = "REPO_OWNER";
/// Environment variable holding the repository name.
pub const ENV_REPO: &str = "REPO_NAME";
/// Environment variable holding the release tag being published.
pub const ENV_TAG: &str = "RELEASE_TAG";

/// Config file looked up in the working directory when `--config` is not given.
pub const LOCAL_CONFIG_FILE: &str = "reldesc.toml";

/// Mirror host settings (optional `[mirror]` section in the config file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Set to false to skip the mirror entirely.
    pub enabled: bool,
    /// Fragment of the primary download URL to replace (host + user).
    pub source: String,
    /// Replacement fragment pointing at the mirror host.
    pub target: String,
    /// Timeout for the HEAD probe against the mirror.
    pub probe_timeout_secs: u64,
    /// Whether the probe follows redirects; without it a 3xx counts as unavailable.
    pub follow_redirects: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source: "github.com/yzyyz1387".to_string(),
            target: "gitee.com/yzyyz1387".to_string(),
            probe_timeout_secs: 10,
            follow_redirects: false,
        }
    }
}

/// Settings for one descriptor build. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReldescConfig {
    /// Project name; the release asset is `<project_name>-<tag>.zip`.
    pub project_name: String,
    /// Markdown changelog with one `## <version>` block per release.
    pub changelog: PathBuf,
    /// Directory receiving `latest.json` and `CNAME`.
    pub output_dir: PathBuf,
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Hostname written to `CNAME`. Empty skips the file.
    pub cname: String,
    pub mirror: MirrorConfig,
}

impl Default for ReldescConfig {
    fn default() -> Self {
        Self {
            project_name: "RogerThat".to_string(),
            changelog: PathBuf::from("version.md"),
            output_dir: PathBuf::from("dist"),
            api_base: "https://api.github.com".to_string(),
            cname: "update.yzyyz.top".to_string(),
            mirror: MirrorConfig::default(),
        }
    }
}

impl ReldescConfig {
    /// Render as TOML (used by `reldesc config`).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Picks the config file to read, if any.
///
/// An explicit path must exist. Otherwise `./reldesc.toml` is preferred over
/// `$XDG_CONFIG_HOME/reldesc/config.toml`; neither existing is not an error.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Ok(Some(local));
    }

    match xdg::BaseDirectories::with_prefix("reldesc") {
        Ok(dirs) => Ok(dirs.find_config_file("config.toml")),
        Err(e) => {
            tracing::debug!("xdg lookup unavailable: {}", e);
            Ok(None)
        }
    }
}

/// Load configuration, falling back to built-in defaults when no file is found.
pub fn load(explicit: Option<&Path>) -> Result<ReldescConfig> {
    match resolve_config_path(explicit)? {
        Some(path) => {
            let cfg = load_from_path(&path)?;
            tracing::debug!("loaded config from {}", path.display());
            Ok(cfg)
        }
        None => Ok(ReldescConfig::default()),
    }
}

pub fn load_from_path(path: &Path) -> Result<ReldescConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ReldescConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Values supplied by the release pipeline through the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ReleaseEnv {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub tag: String,
}

impl ReleaseEnv {
    /// Read all four variables from the process environment.
    pub fn from_env() -> Result<Self, ReleaseError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read all four variables through `lookup`. Unset or empty values fail
    /// with [`ReleaseError::MissingEnv`] naming the first one missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReleaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ReleaseError::MissingEnv(name))
        };
        Ok(Self {
            token: get(ENV_TOKEN)?,
            owner: get(ENV_OWNER)?,
            repo: get(ENV_REPO)?,
            tag: get(ENV_TAG)?,
        })
    }
}

impl fmt::Debug for ReleaseEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseEnv")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("tag", &self.tag)
            .finish()
    }
}
