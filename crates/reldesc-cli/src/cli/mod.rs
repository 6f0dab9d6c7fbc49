//! CLI for reldesc.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reldesc_core::config;
use std::path::PathBuf;

use commands::{run_build, run_checksum, run_latest, run_show_config, BuildOverrides};

/// Top-level CLI for reldesc.
#[derive(Debug, Parser)]
#[command(name = "reldesc")]
#[command(about = "Build the latest.json release descriptor from a changelog and a GitHub release", long_about = None)]
pub struct Cli {
    /// Config file (default: ./reldesc.toml, then $XDG_CONFIG_HOME/reldesc/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build latest.json and CNAME for the release named by RELEASE_TAG.
    ///
    /// Reads GITHUB_TOKEN, REPO_OWNER, REPO_NAME and RELEASE_TAG from the environment.
    Build {
        /// Changelog file to read.
        #[arg(long, value_name = "PATH")]
        changelog: Option<PathBuf>,
        /// Directory to write latest.json and CNAME into.
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Project name used in the asset file name (<project>-<tag>.zip).
        #[arg(long, value_name = "NAME")]
        project: Option<String>,
    },

    /// Print the latest version in the changelog (no network access).
    Latest {
        /// Changelog file to read.
        #[arg(long, value_name = "PATH")]
        changelog: Option<PathBuf>,
        /// Print the whole entry as JSON instead of just the version.
        #[arg(long)]
        json: bool,
    },

    /// Compute SHA-256 of a local file.
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Print the effective configuration as TOML.
    Config,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let cfg = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Build {
                changelog,
                output_dir,
                project,
            } => {
                let overrides = BuildOverrides {
                    changelog,
                    output_dir,
                    project,
                };
                run_build(cfg, overrides)?;
            }
            CliCommand::Latest { changelog, json } => {
                let path = changelog.unwrap_or(cfg.changelog);
                run_latest(&path, json)?;
            }
            CliCommand::Checksum { path } => run_checksum(std::path::Path::new(&path))?,
            CliCommand::Config => run_show_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
