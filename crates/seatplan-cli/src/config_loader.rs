//! Configuration loading utilities for CLI commands

use crate::errors;
use anyhow::{Context, Result};
use seatplan_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

/// Directory holding a workspace's plan and configuration
pub const WORKSPACE_DIR: &str = ".seatplan";

/// Load layered configuration for a workspace
///
/// The config file is optional; a workspace without one runs on defaults.
pub fn load_workspace_config(workspace_root: &Path) -> Result<LayeredConfig> {
    let config_path = workspace_root.join(WORKSPACE_DIR).join("config.toml");

    let mut config = LayeredConfig::with_defaults();
    if config_path.exists() {
        config = config
            .load_from_file(&config_path)
            .context("Failed to load configuration file")?;
    }

    Ok(config.load_from_env())
}

/// Load layered configuration with CLI overrides
pub fn load_workspace_config_with_overrides(
    workspace_root: &Path,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_workspace_config(workspace_root)?;
    config.update_from_cli(overrides);
    Ok(config)
}

/// Find the workspace root by looking for .seatplan directory
pub fn find_workspace_root() -> Result<PathBuf> {
    let current = std::env::current_dir()?;
    find_workspace_root_from(current).ok_or_else(|| errors::workspace_not_found().into())
}

fn find_workspace_root_from(mut current: PathBuf) -> Option<PathBuf> {
    loop {
        if current.join(WORKSPACE_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}
