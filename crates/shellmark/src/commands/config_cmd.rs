//! Config command implementation

use super::Session;
use anyhow::Result;
use clap::Args;
use serde_json::json;
use shellmark_core::ShellKind;

/// Show effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the config command
pub fn execute(args: ConfigArgs, session: &Session) -> Result<()> {
    let config = &session.config;
    let config_exists = session.config_file.exists();

    if args.json {
        let mut locations = serde_json::Map::new();
        for kind in ShellKind::ALL {
            locations.insert(
                kind.name().to_string(),
                json!({
                    "path": config.bookmark_file(kind, &session.home).display().to_string(),
                    "maxSize": config.size_limit(kind),
                }),
            );
        }
        let output = json!({
            "configFile": {
                "path": session.config_file.display().to_string(),
                "exists": config_exists,
            },
            "owner": config.core.owner,
            "icon": config.core.icon,
            "shells": locations,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let status = if config_exists { "(found)" } else { "(not found)" };
    println!("Config file: {} {status}", session.config_file.display());
    println!();
    println!("Configuration:");
    println!("  owner: {}", config.core.owner);
    println!("  icon: {}", config.core.icon);
    for kind in ShellKind::ALL {
        println!(
            "  {}: {} (max {} bytes)",
            kind.name(),
            config.bookmark_file(kind, &session.home).display(),
            config.size_limit(kind)
        );
    }
    println!();
    println!("Effective settings file:");
    print!("{}", toml::to_string(config)?);
    Ok(())
}
