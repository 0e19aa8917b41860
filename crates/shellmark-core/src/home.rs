//! Canonical home directory resolution for shellmark
//!
//! Every default bookmark location is derived from the home directory, so
//! tests and custom deployments redirect all of them at once through the
//! `SHELLMARK_HOME` environment variable.
//!
//! # Precedence
//!
//! 1. `SHELLMARK_HOME` environment variable (if set and non-empty)
//! 2. `dirs::home_dir()` platform default

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory used to locate shell bookmark files
///
/// # Errors
///
/// Returns an error if `SHELLMARK_HOME` is not set and the platform home
/// directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("SHELLMARK_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().context("Could not determine home directory")
}
