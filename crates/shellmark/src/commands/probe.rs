//! Probe command implementation

use super::Session;
use anyhow::Result;
use clap::Args;
use serde_json::json;
use shellmark_core::ShellKind;

/// Report which file managers are available
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the probe command
pub fn execute(args: ProbeArgs, session: &Session) -> Result<()> {
    let mut shells = ShellKind::ALL.to_vec();
    shells.sort_by_key(|kind| std::cmp::Reverse(kind.priority()));

    let rows: Vec<_> = shells
        .into_iter()
        .map(|kind| {
            let file = session.config.bookmark_file(kind, &session.home);
            (kind, file, kind.is_supported(&session.config, &session.home))
        })
        .collect();

    if args.json {
        let output: Vec<_> = rows
            .iter()
            .map(|(kind, file, supported)| {
                json!({
                    "shell": kind.name(),
                    "displayName": kind.display_name(),
                    "priority": kind.priority(),
                    "file": file.display().to_string(),
                    "supported": supported,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (kind, file, supported) in &rows {
            let status = if *supported { "available" } else { "not available" };
            println!(
                "{:<26} {:<14} {}",
                kind.display_name(),
                status,
                file.display()
            );
        }
    }
    Ok(())
}
