//! Bookmark file formats
//!
//! A codec turns the current content of a bookmark file into new content
//! with one entry added or removed. Codecs are pure string transformations:
//! they know nothing about locking, size limits or persistence, which are
//! handled by [`crate::registry::BookmarkRegistry`].

pub mod line_list;
pub mod xbel;

pub use line_list::LineListCodec;
pub use xbel::{XbelCodec, XbelOptions};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Identity of an entry written by a codec, as needed to remove it again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum EntryIdentity {
    /// The exact serialized line of a line-list entry
    Line(String),
    /// The generated ownership id of an XBEL entry
    Id(String),
}

impl EntryIdentity {
    /// Codec able to remove an entry with this identity
    pub fn codec_kind(&self) -> CodecKind {
        match self {
            EntryIdentity::Line(_) => CodecKind::LineList,
            EntryIdentity::Id(_) => CodecKind::Xbel,
        }
    }
}

impl fmt::Display for EntryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryIdentity::Line(line) => write!(f, "line '{line}'"),
            EntryIdentity::Id(id) => write!(f, "id {id}"),
        }
    }
}

/// Available bookmark formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecKind {
    /// Newline-delimited `file://<uri> <name>` list (GTK bookmarks)
    LineList,
    /// XML Bookmark Exchange Language document (KDE places)
    Xbel,
}

/// Result of adding an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// Complete new file content
    pub content: String,
    /// Identity of the inserted entry
    pub identity: EntryIdentity,
}

/// Errors reported by codecs, without file context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Current content is not well-formed or violates the schema
    #[error("{0}")]
    InvalidDocument(String),

    /// Content produced by the codec does not validate
    #[error("{0}")]
    SchemaViolationAfterMutation(String),

    /// No entry with the requested identity exists
    #[error("entry not found")]
    EntryNotFound,

    /// Target cannot be expressed as a `file://` URI
    #[error("invalid target path {0}")]
    InvalidPath(PathBuf),
}

/// Format-specific add/remove algorithm
pub trait EntryCodec: Send + Sync + fmt::Debug {
    /// Format handled by this codec
    fn kind(&self) -> CodecKind;

    /// Add an entry for `target` named `display_name` to `content`
    fn add(&self, content: &str, target: &Path, display_name: &str)
    -> Result<Mutation, CodecError>;

    /// Remove the entry with `identity` from `content`
    ///
    /// Returns `CodecError::EntryNotFound` when no such entry exists, leaving
    /// the caller to decide that nothing needs to be written.
    fn remove(&self, content: &str, identity: &EntryIdentity) -> Result<String, CodecError>;
}

/// Make `target` absolute without touching the filesystem
pub(crate) fn absolute_target(target: &Path) -> Result<PathBuf, CodecError> {
    std::path::absolute(target).map_err(|_| CodecError::InvalidPath(target.to_path_buf()))
}
