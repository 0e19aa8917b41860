//! Known desktop shells and their bookmark files

use crate::codec::CodecKind;
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Size limit of the GTK bookmark list
pub const NAUTILUS_MAX_SIZE: u64 = 4096;

/// Size limit of the KDE places file
pub const DOLPHIN_MAX_SIZE: u64 = 1024 * 1024;

/// A file manager whose quick-access list can be maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Nautilus,
    Dolphin,
}

impl ShellKind {
    pub const ALL: [ShellKind; 2] = [ShellKind::Nautilus, ShellKind::Dolphin];

    /// Short lowercase name, as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ShellKind::Nautilus => "nautilus",
            ShellKind::Dolphin => "dolphin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShellKind::Nautilus => "GNOME Nautilus Bookmarks",
            ShellKind::Dolphin => "KDE Dolphin Places",
        }
    }

    /// Preference among supported shells; higher wins
    pub fn priority(&self) -> u32 {
        match self {
            ShellKind::Nautilus => 100,
            ShellKind::Dolphin => 90,
        }
    }

    pub fn codec_kind(&self) -> CodecKind {
        match self {
            ShellKind::Nautilus => CodecKind::LineList,
            ShellKind::Dolphin => CodecKind::Xbel,
        }
    }

    /// Shell whose bookmark file uses `codec`
    pub fn for_codec(codec: CodecKind) -> Self {
        match codec {
            CodecKind::LineList => ShellKind::Nautilus,
            CodecKind::Xbel => ShellKind::Dolphin,
        }
    }

    pub fn default_location(&self, home: &Path) -> PathBuf {
        match self {
            ShellKind::Nautilus => home.join(".config/gtk-3.0/bookmarks"),
            ShellKind::Dolphin => home.join(".local/share/user-places.xbel"),
        }
    }

    pub fn default_max_size(&self) -> u64 {
        match self {
            ShellKind::Nautilus => NAUTILUS_MAX_SIZE,
            ShellKind::Dolphin => DOLPHIN_MAX_SIZE,
        }
    }

    /// Capability probe
    ///
    /// Nautilus counts as present when its executable is on `PATH`, Dolphin
    /// when its places file exists.
    pub fn is_supported(&self, config: &Config, home: &Path) -> bool {
        let supported = match self {
            ShellKind::Nautilus => which::which("nautilus").is_ok(),
            ShellKind::Dolphin => config.bookmark_file(*self, home).is_file(),
        };
        debug!("Probed {}: supported={supported}", self.name());
        supported
    }

    /// Supported shells, highest priority first
    pub fn detect(config: &Config, home: &Path) -> Vec<ShellKind> {
        let mut shells: Vec<ShellKind> = Self::ALL
            .into_iter()
            .filter(|kind| kind.is_supported(config, home))
            .collect();
        shells.sort_by_key(|kind| std::cmp::Reverse(kind.priority()));
        shells
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nautilus" | "gnome" => Ok(ShellKind::Nautilus),
            "dolphin" | "kde" => Ok(ShellKind::Dolphin),
            other => Err(format!(
                "unknown shell '{other}' (expected 'nautilus' or 'dolphin')"
            )),
        }
    }
}
