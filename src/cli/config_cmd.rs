use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::config;

use super::output;

/// Arguments for the `statusline config` subcommand.
#[derive(ClapArgs)]
pub struct Args {}

/// Print the resolved path and the effective configuration as TOML.
/// Problems go to stderr so stdout stays valid TOML.
pub fn run(_args: Args) -> Result<()> {
    let loaded = config::load();

    match &loaded.path {
        Some(path) if path.exists() => output::info(&format!("config file: {}", path.display())),
        Some(path) => output::info(&format!(
            "config file: {} (not found, using defaults)",
            path.display()
        )),
        None => output::info("no config directory on this platform, using defaults"),
    }

    let text = toml::to_string(&loaded.config).context("failed to serialize configuration")?;
    if let Some(path) = &loaded.path {
        println!("# {}", path.display());
    }
    print!("{text}");

    if loaded.problems.is_empty() {
        output::success("configuration is valid");
    } else {
        for problem in &loaded.problems {
            output::warning(problem);
        }
    }
    Ok(())
}
