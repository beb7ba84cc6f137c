//! Design configuration loading.
//!
//! Parses a [`DesignConfig`] from TOML and validates every section before
//! anything is built from it.

use std::path::Path;

use drive_common::config::ConfigLoader;
use drive_common::design::DesignConfig;
use tracing::debug;

use crate::error::DesignError;

/// Load and validate a design configuration file.
pub fn load_design_config(path: &Path) -> Result<DesignConfig, DesignError> {
    let config = DesignConfig::load(path)?;
    config.validate()?;
    debug!(path = %path.display(), service = %config.shared.service_name, "design config loaded");
    Ok(config)
}

/// Parse and validate a design configuration held in memory.
pub fn design_config_from_str(content: &str) -> Result<DesignConfig, DesignError> {
    let config = DesignConfig::from_toml(content)?;
    config.validate()?;
    Ok(config)
}
