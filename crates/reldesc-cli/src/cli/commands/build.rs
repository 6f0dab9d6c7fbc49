//! `reldesc build` – run the release descriptor pipeline.

use anyhow::Result;
use reldesc_core::config::{ReldescConfig, ReleaseEnv};
use reldesc_core::ReleaseDescriptorBuilder;
use std::path::PathBuf;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct BuildOverrides {
    pub changelog: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub project: Option<String>,
}

impl BuildOverrides {
    pub(crate) fn apply(self, mut cfg: ReldescConfig) -> ReldescConfig {
        if let Some(changelog) = self.changelog {
            cfg.changelog = changelog;
        }
        if let Some(output_dir) = self.output_dir {
            cfg.output_dir = output_dir;
        }
        if let Some(project) = self.project {
            cfg.project_name = project;
        }
        cfg
    }
}

pub fn run_build(cfg: ReldescConfig, overrides: BuildOverrides) -> Result<()> {
    let env = ReleaseEnv::from_env()?;
    tracing::debug!("release env: {:?}", env);
    let cfg = overrides.apply(cfg);

    let builder = ReleaseDescriptorBuilder::new(cfg, env);
    let (descriptor, written) = builder.run()?;

    println!(
        "{} {} -> {}",
        descriptor.version,
        descriptor.sha256,
        written.descriptor.display()
    );
    if let Some(cname) = written.cname {
        println!("{}", cname.display());
    }
    Ok(())
}
