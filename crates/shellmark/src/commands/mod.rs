//! CLI command dispatch and execution

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shellmark_core::config::{Config, ConfigOverrides, resolve_config};
use shellmark_core::home::get_home_dir;
use std::path::PathBuf;

mod add;
mod config_cmd;
mod probe;
mod remove;

/// shellmark - quick-access bookmarks for desktop file managers
#[derive(Parser, Debug)]
#[command(
    name = "shellmark",
    version,
    about = "Quick-access bookmarks for desktop file managers",
    long_about = "Adds and removes sidebar entries in the GNOME Nautilus bookmark list and the KDE Dolphin places file without corrupting them"
)]
pub struct Cli {
    /// Config file to use instead of ~/.config/shellmark/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a bookmark and print its handle
    Add(add::AddArgs),

    /// Remove a bookmark given its handle
    Remove(remove::RemoveArgs),

    /// Report which shells are available
    Probe(probe::ProbeArgs),

    /// Show effective configuration
    Config(config_cmd::ConfigArgs),
}

/// Home directory and resolved configuration shared by all commands
pub(crate) struct Session {
    pub home: PathBuf,
    pub config: Config,
    pub config_file: PathBuf,
}

impl Session {
    fn load(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> Result<Self> {
        let home = get_home_dir()?;
        let overrides = ConfigOverrides {
            config_path,
            ..overrides
        };
        let config_file = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| shellmark_core::config::config_file_path(&home));
        let config = resolve_config(&overrides, &home)
            .with_context(|| format!("Failed to load configuration from {}", config_file.display()))?;
        Ok(Self {
            home,
            config,
            config_file,
        })
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Add(args) => {
                let session = Session::load(self.config, args.overrides())?;
                add::execute(args, &session)
            }
            Commands::Remove(args) => {
                let session = Session::load(self.config, args.overrides())?;
                remove::execute(args, &session)
            }
            Commands::Probe(args) => {
                let session = Session::load(self.config, ConfigOverrides::default())?;
                probe::execute(args, &session)
            }
            Commands::Config(args) => {
                let session = Session::load(self.config, ConfigOverrides::default())?;
                config_cmd::execute(args, &session)
            }
        }
    }
}
