//! shellmark - quick-access bookmarks for desktop file managers
//!
//! A thin CLI over `shellmark-core`: adds an entry to the Nautilus or
//! Dolphin bookmark file, prints a handle, and removes the entry again
//! given that handle.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() {
    shellmark_core::logging::init();
    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
