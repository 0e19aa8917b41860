//! Bookmark registry: guarded add/remove on one shell-owned file
//!
//! Each operation runs under the file's [`MutationLock`] and follows the same
//! cycle: size check, read, codec transformation, atomic persistence. The
//! file on disk is only replaced once the complete new content exists in
//! memory, so any failure leaves it exactly as it was.

use crate::codec::{
    CodecError, CodecKind, EntryCodec, EntryIdentity, LineListCodec, XbelCodec, XbelOptions,
};
use crate::config::{Config, CoreConfig};
use crate::io::{BookmarkError, MutationLock, atomic, hash::compute_hash, size_guard};
use crate::shell::ShellKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace, warn};

/// Proof of a successful add, holding what is needed to remove the entry
///
/// Handles serialize to JSON so they can be kept across processes. Whether
/// the handle was already used is only tracked within the current process.
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryHandle {
    config_path: PathBuf,
    identity: EntryIdentity,
    #[serde(skip)]
    removed: AtomicBool,
}

impl EntryHandle {
    pub(crate) fn new(config_path: PathBuf, identity: EntryIdentity) -> Self {
        Self {
            config_path,
            identity,
            removed: AtomicBool::new(false),
        }
    }

    /// Bookmark file the entry was written to
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn identity(&self) -> &EntryIdentity {
        &self.identity
    }

    /// Whether `remove` already succeeded for this handle
    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::Acquire)
    }

    fn mark_removed(&self) {
        self.removed.store(true, Ordering::Release);
    }
}

/// Add/remove access to one bookmark file through one codec
#[derive(Debug)]
pub struct BookmarkRegistry {
    path: PathBuf,
    max_size: u64,
    codec: Box<dyn EntryCodec>,
    lock: MutationLock,
}

impl BookmarkRegistry {
    pub fn new(path: impl Into<PathBuf>, max_size: u64, codec: Box<dyn EntryCodec>) -> Self {
        let path = path.into();
        let lock = MutationLock::for_path(&path);
        Self {
            path,
            max_size,
            codec,
            lock,
        }
    }

    /// Registry for a GTK-style bookmark list
    pub fn line_list(path: impl Into<PathBuf>, max_size: u64) -> Self {
        Self::new(path, max_size, Box::new(LineListCodec::new()))
    }

    /// Registry for an XBEL places file
    pub fn xbel(path: impl Into<PathBuf>, max_size: u64, options: XbelOptions) -> Self {
        Self::new(path, max_size, Box::new(XbelCodec::new(options)))
    }

    /// Registry using the codec for `kind`, with XBEL options from `core`
    pub fn with_codec_kind(
        kind: CodecKind,
        path: impl Into<PathBuf>,
        max_size: u64,
        core: &CoreConfig,
    ) -> Self {
        match kind {
            CodecKind::LineList => Self::line_list(path, max_size),
            CodecKind::Xbel => Self::xbel(path, max_size, core.xbel_options()),
        }
    }

    /// Registry for the bookmark file of `shell` as configured
    pub fn for_shell(shell: ShellKind, config: &Config, home: &Path) -> Self {
        Self::with_codec_kind(
            shell.codec_kind(),
            config.bookmark_file(shell, home),
            config.size_limit(shell),
            &config.core,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    pub fn codec_kind(&self) -> CodecKind {
        self.codec.kind()
    }

    /// Add an entry for `target` named `display_name`
    ///
    /// # Errors
    ///
    /// `SizeExceeded`, `Io`, `InvalidDocument`, `InvalidPath` or
    /// `SchemaViolationAfterMutation`; the file is unchanged in every case.
    pub fn add(&self, target: &Path, display_name: &str) -> Result<EntryHandle, BookmarkError> {
        self.lock.with_lock(|| {
            size_guard::check(&self.path, self.max_size)?;
            let (content, read_hash) = self.read()?;

            let mutation = self
                .codec
                .add(&content, target, display_name)
                .map_err(|e| BookmarkError::from_codec(&self.path, e))?;
            self.persist(&mutation.content, &read_hash)?;

            trace!(
                "Added {} for {} to {}",
                mutation.identity,
                target.display(),
                self.path.display()
            );
            Ok(EntryHandle::new(
                self.lock.path().to_path_buf(),
                mutation.identity,
            ))
        })
    }

    /// Remove the entry behind `handle`
    ///
    /// Idempotent: a handle that was already used, or whose entry or file
    /// is gone, succeeds without touching the file.
    ///
    /// # Errors
    ///
    /// `ForeignHandle` when `handle` belongs to another file, otherwise
    /// `SizeExceeded`, `Io`, `InvalidDocument` or
    /// `SchemaViolationAfterMutation`.
    pub fn remove(&self, handle: &EntryHandle) -> Result<(), BookmarkError> {
        if handle.config_path() != self.lock.path() {
            return Err(BookmarkError::ForeignHandle {
                handle_path: handle.config_path().to_path_buf(),
                registry_path: self.lock.path().to_path_buf(),
            });
        }

        self.lock.with_lock(|| {
            if handle.is_removed() {
                debug!("{} already removed from {}", handle.identity(), self.path.display());
                return Ok(());
            }

            match size_guard::check(&self.path, self.max_size) {
                Err(BookmarkError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    debug!("{} no longer exists, nothing to remove", self.path.display());
                    handle.mark_removed();
                    return Ok(());
                }
                other => other?,
            }
            let (content, read_hash) = self.read()?;

            match self.codec.remove(&content, handle.identity()) {
                Ok(new_content) if new_content == content => {
                    debug!("Removing {} left {} unchanged", handle.identity(), self.path.display());
                }
                Ok(new_content) => {
                    self.persist(&new_content, &read_hash)?;
                    trace!("Removed {} from {}", handle.identity(), self.path.display());
                }
                Err(CodecError::EntryNotFound) => {
                    debug!("{} not present in {}", handle.identity(), self.path.display());
                }
                Err(e) => return Err(BookmarkError::from_codec(&self.path, e)),
            }

            handle.mark_removed();
            Ok(())
        })
    }

    /// Read the whole file, returning its text and digest
    fn read(&self) -> Result<(String, String), BookmarkError> {
        let bytes = fs::read(&self.path).map_err(|e| BookmarkError::io(&self.path, e))?;
        let hash = compute_hash(&bytes);
        let content = String::from_utf8(bytes).map_err(|e| BookmarkError::InvalidDocument {
            path: self.path.clone(),
            reason: format!("not valid UTF-8: {e}"),
        })?;
        Ok((content, hash))
    }

    /// Replace the file, warning if it changed since it was read
    fn persist(&self, content: &str, read_hash: &str) -> Result<(), BookmarkError> {
        if self.changed_since(read_hash) {
            warn!(
                "{} was modified by another writer while being updated; that change may be lost",
                self.path.display()
            );
        }
        atomic::persist(&self.path, content.as_bytes())
    }

    fn changed_since(&self, read_hash: &str) -> bool {
        if size_guard::check(&self.path, self.max_size).is_err() {
            return true;
        }
        match fs::read(&self.path) {
            Ok(current) => compute_hash(&current) != read_hash,
            Err(e) => {
                debug!("Could not re-read {}: {e}", self.path.display());
                true
            }
        }
    }
}
