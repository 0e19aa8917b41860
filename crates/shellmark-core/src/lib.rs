//! Core engine for shellmark
//!
//! This crate maintains "quick access" shortcuts in the bookmark files of
//! desktop file managers (`~/.config/gtk-3.0/bookmarks` for Nautilus,
//! `~/.local/share/user-places.xbel` for Dolphin). Those files belong to the
//! shell and are rewritten by it at any time, so every mutation is a guarded
//! read-modify-write cycle:
//!
//! - size check before the file is read
//! - validation of the current document before anything is changed
//! - re-validation of the changed document before it is written
//! - atomic replacement through a sibling temp file
//! - idempotent removal through an [`EntryHandle`]
//!
//! # Example
//!
//! ```rust,no_run
//! use shellmark_core::{BookmarkError, BookmarkRegistry};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), BookmarkError> {
//! let registry = BookmarkRegistry::line_list("/home/user/.config/gtk-3.0/bookmarks", 4096);
//! let handle = registry.add(Path::new("/media/vault"), "My Vault")?;
//! // ... later, e.g. on unmount
//! registry.remove(&handle)?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod home;
pub mod io;
pub mod logging;
pub mod registry;
pub mod shell;

pub use codec::{CodecKind, EntryIdentity};
pub use io::BookmarkError;
pub use registry::{BookmarkRegistry, EntryHandle};
pub use shell::ShellKind;
