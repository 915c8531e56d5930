use std::{fs, path::Path};

use anyhow::{Context, Result};
use garden_core::GardenConfig;

/// Loads the configuration from `path`, or the defaults when none is given.
pub(crate) fn load(path: Option<&Path>) -> Result<GardenConfig> {
    let Some(path) = path else {
        return Ok(GardenConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid configuration {}", path.display()))
}

/// Parses and validates a TOML configuration document.
pub(crate) fn parse(text: &str) -> Result<GardenConfig> {
    let config: GardenConfig = toml::from_str(text).context("malformed TOML")?;
    config.validate()?;
    Ok(config)
}
