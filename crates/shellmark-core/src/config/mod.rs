//! Configuration resolution
//!
//! Resolves configuration from multiple sources with priority:
//! 1. Command-line flags (passed as parameters)
//! 2. Environment variables
//! 3. Config file (~/.config/shellmark/config.toml)
//! 4. Defaults

mod discovery;
mod types;

pub use discovery::{config_file_path, resolve_config, ConfigError, ConfigOverrides};
pub use types::{Config, CoreConfig, ShellConfig};
