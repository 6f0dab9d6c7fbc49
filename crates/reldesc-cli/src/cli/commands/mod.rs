//! CLI command handlers, one per file.

mod build;
mod checksum;
mod latest;
mod show_config;

pub use build::{run_build, BuildOverrides};
pub use checksum::run_checksum;
pub use latest::run_latest;
pub use show_config::run_show_config;
