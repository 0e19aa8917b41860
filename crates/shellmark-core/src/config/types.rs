//! Configuration types

use crate::codec::XbelOptions;
use crate::codec::xbel::{DEFAULT_ICON, DEFAULT_OWNER};
use crate::shell::ShellKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Core configuration
    #[serde(default)]
    pub core: CoreConfig,
    /// GNOME Nautilus bookmark list
    #[serde(default)]
    pub nautilus: ShellConfig,
    /// KDE Dolphin places file
    #[serde(default)]
    pub dolphin: ShellConfig,
}

/// Core configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Ownership marker URI written into XBEL entries
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Icon name written into XBEL entries
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            icon: default_icon(),
        }
    }
}

impl CoreConfig {
    pub fn xbel_options(&self) -> XbelOptions {
        XbelOptions {
            owner: self.owner.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// Location and size limit of one shell's bookmark file
///
/// Unset values fall back to the shell's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Config {
    pub fn shell(&self, kind: ShellKind) -> &ShellConfig {
        match kind {
            ShellKind::Nautilus => &self.nautilus,
            ShellKind::Dolphin => &self.dolphin,
        }
    }

    pub fn shell_mut(&mut self, kind: ShellKind) -> &mut ShellConfig {
        match kind {
            ShellKind::Nautilus => &mut self.nautilus,
            ShellKind::Dolphin => &mut self.dolphin,
        }
    }

    /// Bookmark file of `kind`: the configured path or the default under `home`
    pub fn bookmark_file(&self, kind: ShellKind, home: &Path) -> PathBuf {
        self.shell(kind)
            .path
            .clone()
            .unwrap_or_else(|| kind.default_location(home))
    }

    /// Size limit of the bookmark file of `kind`
    pub fn size_limit(&self, kind: ShellKind) -> u64 {
        self.shell(kind)
            .max_size
            .unwrap_or_else(|| kind.default_max_size())
    }
}
