//! Error types for bookmark file operations

use crate::codec::CodecError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while adding or removing a bookmark
///
/// Every variant aborts the current operation and leaves the bookmark file
/// on disk untouched.
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// Bookmark file is larger than the configured limit
    #[error("File {path} exceeds size of {limit} bytes ({actual} bytes)")]
    SizeExceeded {
        path: PathBuf,
        limit: u64,
        actual: u64,
    },

    /// File I/O error (read, write, rename or copy)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Existing file is not well-formed or violates the bookmark schema
    #[error("Invalid bookmark document {path}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    /// The document produced by a mutation failed validation
    #[error("Mutated bookmark document would be invalid: {reason}")]
    SchemaViolationAfterMutation { reason: String },

    /// No entry carries the requested identity
    #[error("Bookmark entry not found in {path}")]
    EntryNotFound { path: PathBuf },

    /// Target path cannot be turned into a bookmark URI
    #[error("Invalid target path: {path}")]
    InvalidPath { path: PathBuf },

    /// Handle belongs to a registry managing a different file
    #[error("Handle for {handle_path} cannot be removed through registry for {registry_path}")]
    ForeignHandle {
        handle_path: PathBuf,
        registry_path: PathBuf,
    },
}

impl BookmarkError {
    /// Attach the bookmark file path to an error reported by a codec
    pub fn from_codec(path: &Path, err: CodecError) -> Self {
        match err {
            CodecError::InvalidDocument(reason) => BookmarkError::InvalidDocument {
                path: path.to_path_buf(),
                reason,
            },
            CodecError::SchemaViolationAfterMutation(reason) => {
                BookmarkError::SchemaViolationAfterMutation { reason }
            }
            CodecError::EntryNotFound => BookmarkError::EntryNotFound {
                path: path.to_path_buf(),
            },
            CodecError::InvalidPath(path) => BookmarkError::InvalidPath { path },
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        BookmarkError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
