//! `reldesc config` – print the effective configuration.

use anyhow::Result;
use reldesc_core::config::ReldescConfig;

pub fn run_show_config(cfg: &ReldescConfig) -> Result<()> {
    print!("{}", cfg.to_toml()?);
    Ok(())
}
