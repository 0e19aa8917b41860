//! Atomic replacement of bookmark files
//!
//! New content is written to a sibling temp file (`.<name>.shellmark.tmp`),
//! synced, and renamed over the target, so a reader of the target path only
//! ever sees the previous or the new complete content. When the filesystem
//! refuses the rename across devices, the temp file is copied over the target
//! instead; that fallback is the only path with a non-atomic window.
//!
//! Temp files are tracked in a process-wide set until they are renamed away.
//! A drop guard removes them on error paths and an exit hook removes whatever
//! is still pending when the process exits.

use crate::io::error::BookmarkError;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once, OnceLock};
use tracing::{debug, warn};

const TEMP_SUFFIX: &str = ".shellmark.tmp";

static PENDING: OnceLock<Mutex<HashSet<PathBuf>>> = OnceLock::new();
static EXIT_HOOK: Once = Once::new();

fn pending() -> &'static Mutex<HashSet<PathBuf>> {
    PENDING.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Replace the content of `target` with `content` atomically
///
/// A symlinked target is resolved first so the link itself survives and the
/// file it points to receives the new content. The new file keeps the
/// permission bits of the file it replaces.
///
/// # Errors
///
/// Returns `BookmarkError::Io` if writing the temp file, renaming or the
/// copy fallback fails, and `BookmarkError::InvalidPath` if the target has no
/// file name.
pub fn persist(target: &Path, content: &[u8]) -> Result<(), BookmarkError> {
    let target = resolve_target(target)?;
    let tmp_path = temp_path_for(&target)?;
    let guard = TempFileGuard::register(tmp_path.clone());

    write_synced(&tmp_path, content)?;

    if let Ok(meta) = fs::metadata(&target)
        && let Err(e) = fs::set_permissions(&tmp_path, meta.permissions())
    {
        warn!("Could not copy permissions of {} to temp file: {e}", target.display());
    }

    match fs::rename(&tmp_path, &target) {
        Ok(()) => {
            debug!("Atomically replaced {}", target.display());
            guard.disarm();
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            warn!(
                "Atomic rename not supported for {} ({e}), falling back to copy",
                target.display()
            );
            fs::copy(&tmp_path, &target).map_err(|e| BookmarkError::io(&target, e))?;
            Ok(())
        }
        Err(e) => Err(BookmarkError::io(&target, e)),
    }
}

/// Path of the temp file used when persisting `target`
///
/// The name is derived from the target's file name and lives in the same
/// directory, so the final rename never crosses a filesystem boundary.
pub fn temp_path_for(target: &Path) -> Result<PathBuf, BookmarkError> {
    let file_name = target
        .file_name()
        .ok_or_else(|| BookmarkError::InvalidPath {
            path: target.to_path_buf(),
        })?
        .to_string_lossy();
    Ok(target.with_file_name(format!(".{file_name}{TEMP_SUFFIX}")))
}

/// Remove every temp file still registered as pending
///
/// Returns the number of files that were removed. Called by the exit hook;
/// binaries with their own shutdown path may call it directly.
pub fn cleanup_pending() -> usize {
    let mut set = match pending().try_lock() {
        Ok(set) => set,
        Err(std::sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        Err(std::sync::TryLockError::WouldBlock) => return 0,
    };
    remove_all(&mut set)
}

fn remove_all(set: &mut HashSet<PathBuf>) -> usize {
    let mut removed = 0;
    for path in set.drain() {
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Unable to delete {}: {e}. Needs to be deleted manually.",
                path.display()
            ),
        }
    }
    removed
}

fn resolve_target(target: &Path) -> Result<PathBuf, BookmarkError> {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let resolved = fs::canonicalize(target).map_err(|e| BookmarkError::io(target, e))?;
            debug!(
                "Resolved symlinked bookmark file {} to {}",
                target.display(),
                resolved.display()
            );
            Ok(resolved)
        }
        _ => Ok(target.to_path_buf()),
    }
}

/// Write `content` to a freshly created file at `path`
///
/// Whatever already sits at `path` is unlinked first. The file is then
/// created exclusively, so a symlink planted there in between is never
/// followed.
fn write_synced(path: &Path, content: &[u8]) -> Result<(), BookmarkError> {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed stale temp file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(BookmarkError::io(path, e)),
    }
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| BookmarkError::io(path, e))?;
    file.write_all(content)
        .map_err(|e| BookmarkError::io(path, e))?;
    file.sync_all().map_err(|e| BookmarkError::io(path, e))
}

fn is_cross_device(err: &std::io::Error) -> bool {
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(libc::EXDEV)
    }

    #[cfg(not(unix))]
    {
        err.kind() == std::io::ErrorKind::CrossesDevices
    }
}

#[cfg(unix)]
extern "C" fn remove_pending_at_exit() {
    cleanup_pending();
}

fn install_exit_hook() {
    EXIT_HOOK.call_once(|| {
        #[cfg(unix)]
        {
            // SAFETY: registers a plain extern "C" function without captured state.
            let rc = unsafe { libc::atexit(remove_pending_at_exit) };
            if rc != 0 {
                warn!("Failed to register temp file cleanup hook");
            }
        }
    });
}

/// Registration of a temp file that is removed again unless disarmed
struct TempFileGuard {
    path: PathBuf,
    armed: bool,
}

impl TempFileGuard {
    fn register(path: PathBuf) -> Self {
        install_exit_hook();
        pending()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path.clone());
        Self { path, armed: true }
    }

    /// The temp file was renamed away; nothing is left to clean up.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        pending()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.path);

        if self.armed
            && let Err(e) = fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(
                "Unable to delete {}: {e}. Needs to be deleted manually.",
                self.path.display()
            );
        }
    }
}
