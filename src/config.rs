use std::path::Path;

use anyhow::{Result, Context};
use log::debug;

use crate::stub::types::StubOptions;
use crate::utils::file_utils;

/// Parse stub options from TOML text; missing keys keep their defaults
pub fn options_from_toml(content: &str) -> Result<StubOptions> {
    toml::from_str(content).context("Failed to parse stub configuration")
}

/// Load stub options from a TOML file
pub fn load_options(path: impl AsRef<Path>) -> Result<StubOptions> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());

    let content = file_utils::read_file_to_string(path)?;
    options_from_toml(&content)
        .with_context(|| format!("Invalid configuration file {}", path.display()))
}
