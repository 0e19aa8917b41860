//! Configuration discovery and resolution

use super::types::Config;
use crate::shell::ShellKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Command-line overrides for configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Override the Nautilus bookmark list
    pub nautilus_path: Option<PathBuf>,
    /// Override the Dolphin places file
    pub dolphin_path: Option<PathBuf>,
    /// Override the ownership marker
    pub owner: Option<String>,
    /// Path to config file override
    pub config_path: Option<PathBuf>,
}

/// Location of the global config file under `home_dir`
pub fn config_file_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/shellmark/config.toml")
}

/// Resolve configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables
/// 3. Config file (`--config` or ~/.config/shellmark/config.toml)
/// 4. Defaults
///
/// A broken global config file is skipped with a warning; a config file
/// named explicitly must load.
pub fn resolve_config(overrides: &ConfigOverrides, home_dir: &Path) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(ref explicit) = overrides.config_path {
        merge_config(&mut config, load_config_file(explicit)?);
    } else {
        let global_config_path = config_file_path(home_dir);
        if global_config_path.exists() {
            if let Ok(file_config) = load_config_file(&global_config_path) {
                merge_config(&mut config, file_config);
            } else {
                warn!("Failed to parse global config at {global_config_path:?}");
            }
        }
    }

    apply_env_overrides(&mut config);
    apply_cli_overrides(&mut config, overrides);

    Ok(config)
}

/// Load config from a TOML file
fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Merge file config into base config
fn merge_config(base: &mut Config, file: Config) {
    for kind in ShellKind::ALL {
        let file_shell = file.shell(kind);
        let shell = base.shell_mut(kind);
        if file_shell.path.is_some() {
            shell.path.clone_from(&file_shell.path);
        }
        if file_shell.max_size.is_some() {
            shell.max_size = file_shell.max_size;
        }
    }

    base.core = file.core;
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Apply environment variable overrides
fn apply_env_overrides(config: &mut Config) {
    if let Some(path) = env_path("SHELLMARK_NAUTILUS_BOOKMARKS") {
        config.nautilus.path = Some(path);
    }

    if let Some(path) = env_path("SHELLMARK_DOLPHIN_PLACES") {
        config.dolphin.path = Some(path);
    }

    if let Ok(owner) = std::env::var("SHELLMARK_OWNER")
        && !owner.trim().is_empty()
    {
        config.core.owner = owner.trim().to_string();
    }
}

/// Apply command-line overrides
fn apply_cli_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(ref path) = overrides.nautilus_path {
        config.nautilus.path = Some(path.clone());
    }

    if let Some(ref path) = overrides.dolphin_path {
        config.dolphin.path = Some(path.clone());
    }

    if let Some(ref owner) = overrides.owner {
        config.core.owner = owner.clone();
    }
}
