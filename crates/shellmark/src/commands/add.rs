//! Add command implementation

use super::Session;
use anyhow::{Context, Result};
use clap::Args;
use shellmark_core::config::ConfigOverrides;
use shellmark_core::{BookmarkRegistry, ShellKind};
use std::path::PathBuf;
use tracing::debug;

/// Add a bookmark to a file manager sidebar
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Directory the bookmark points to
    target: PathBuf,

    /// Name shown in the sidebar
    name: String,

    /// Shell to add the bookmark to (nautilus or dolphin); detected when omitted
    #[arg(long)]
    shell: Option<ShellKind>,

    /// Bookmark file to edit instead of the configured one
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Ownership marker for XBEL entries
    #[arg(long)]
    owner: Option<String>,

    /// Print only the handle, as JSON
    #[arg(long)]
    json: bool,
}

impl AddArgs {
    /// Shell whose file `--file` replaces; `.xbel` files default to Dolphin
    fn file_shell(&self) -> Option<ShellKind> {
        let file = self.file.as_ref()?;
        Some(self.shell.unwrap_or_else(|| {
            if file.extension().is_some_and(|ext| ext == "xbel") {
                ShellKind::Dolphin
            } else {
                ShellKind::Nautilus
            }
        }))
    }

    pub(crate) fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            owner: self.owner.clone(),
            ..Default::default()
        };
        match self.file_shell() {
            Some(ShellKind::Nautilus) => overrides.nautilus_path = self.file.clone(),
            Some(ShellKind::Dolphin) => overrides.dolphin_path = self.file.clone(),
            None => {}
        }
        overrides
    }
}

/// Execute the add command
pub fn execute(args: AddArgs, session: &Session) -> Result<()> {
    let shell = match args.file_shell().or(args.shell) {
        Some(shell) => shell,
        None => ShellKind::detect(&session.config, &session.home)
            .first()
            .copied()
            .context("No supported file manager detected; pass --shell or --file")?,
    };

    let registry = BookmarkRegistry::for_shell(shell, &session.config, &session.home);
    debug!("Adding '{}' via {} at {}", args.name, shell, registry.path().display());

    let handle = registry
        .add(&args.target, &args.name)
        .with_context(|| format!("Could not add shortcut to {}", shell.display_name()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&handle)?);
    } else {
        println!(
            "Added '{}' to {} ({})",
            args.name,
            shell.display_name(),
            registry.path().display()
        );
        println!("Handle: {}", serde_json::to_string(&handle)?);
    }
    Ok(())
}
