//! Remove command implementation

use super::Session;
use anyhow::{Context, Result, bail};
use clap::Args;
use shellmark_core::config::ConfigOverrides;
use shellmark_core::{BookmarkRegistry, EntryHandle, ShellKind};
use std::fs;
use std::path::PathBuf;

/// Remove a bookmark given the handle printed by `add`
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Handle JSON as printed by `shellmark add`
    #[arg(required_unless_present = "handle_file", conflicts_with = "handle_file")]
    handle: Option<String>,

    /// Read the handle from a file
    #[arg(long, value_name = "PATH")]
    handle_file: Option<PathBuf>,

    /// Ownership marker the entry was written with
    #[arg(long)]
    owner: Option<String>,
}

impl RemoveArgs {
    pub(crate) fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            owner: self.owner.clone(),
            ..Default::default()
        }
    }

    fn read_handle(&self) -> Result<EntryHandle> {
        let json = match (&self.handle, &self.handle_file) {
            (Some(json), _) => json.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read handle from {}", path.display()))?,
            (None, None) => bail!("A handle or --handle-file is required"),
        };
        serde_json::from_str(json.trim()).context("Invalid handle")
    }
}

/// Execute the remove command
pub fn execute(args: RemoveArgs, session: &Session) -> Result<()> {
    let handle = args.read_handle()?;
    let codec = handle.identity().codec_kind();
    let shell = ShellKind::for_codec(codec);

    let registry = BookmarkRegistry::with_codec_kind(
        codec,
        handle.config_path(),
        session.config.size_limit(shell),
        &session.config.core,
    );
    registry
        .remove(&handle)
        .with_context(|| format!("Could not remove shortcut from {}", shell.display_name()))?;

    println!(
        "Removed {} from {}",
        handle.identity(),
        registry.path().display()
    );
    Ok(())
}
