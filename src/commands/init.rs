use std::path::PathBuf;

use anyhow::{Context, Result};

use wellscrape::config::Config;

pub fn run(path: PathBuf) -> Result<()> {
    let config_path = if path.is_dir() {
        path.join("config.toml")
    } else {
        path
    };

    if config_path.exists() {
        anyhow::bail!("config file '{}' already exists", config_path.display());
    }

    let toml = toml::to_string_pretty(&Config::default())
        .context("failed to serialize default configuration")?;
    std::fs::write(&config_path, toml)
        .with_context(|| format!("failed to write '{}'", config_path.display()))?;

    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}
