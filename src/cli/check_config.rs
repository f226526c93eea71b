use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mzfeature::config::PipelineConfig;

/// Load a configuration file and print the effective settings
pub fn run(file: PathBuf) -> Result<()> {
    let config = PipelineConfig::from_file(&file)
        .with_context(|| format!("Invalid configuration: {}", file.display()))?;
    info!("{} is valid", file.display());

    let effective = serde_json::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("{effective}");
    Ok(())
}
