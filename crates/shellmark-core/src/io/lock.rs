//! In-process serialization of mutations per bookmark file
//!
//! There is exactly one lock per distinct bookmark file path in a process.
//! All registries and handles working on the same file share it, so two
//! threads never interleave their read-modify-write cycles. The lock is not
//! visible to other processes; cross-process safety comes from atomic
//! replacement and idempotent removal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

/// Mutual-exclusion gate for one bookmark file
#[derive(Debug, Clone)]
pub struct MutationLock {
    path: PathBuf,
    inner: Arc<Mutex<()>>,
}

impl MutationLock {
    /// Get the process-wide lock for `path`
    ///
    /// Relative paths are made absolute first so that `bookmarks` and
    /// `$PWD/bookmarks` share a lock.
    pub fn for_path(path: &Path) -> Self {
        let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let mut locks = LOCKS
            .get_or_init(|| Mutex::new(HashMap::new()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let inner = Arc::clone(locks.entry(key.clone()).or_default());
        Self { path: key, inner }
    }

    /// Path this lock guards
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` while holding the lock
    ///
    /// Blocks until the lock is free. A panic in a previous holder does not
    /// poison the gate, since no state lives behind it.
    pub fn with_lock<T>(&self, f: impl FnOnce() -> T) -> T {
        let _guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f()
    }
}

/// Run `f` under the process-wide lock of `path`
pub fn with_lock<T>(path: &Path, f: impl FnOnce() -> T) -> T {
    MutationLock::for_path(path).with_lock(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_same_path_shares_lock() {
        let a = MutationLock::for_path(Path::new("/tmp/shellmark-lock-test/bookmarks"));
        let b = MutationLock::for_path(Path::new("/tmp/shellmark-lock-test/bookmarks"));
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
    }

    #[test]
    fn test_different_paths_do_not_share_lock() {
        let a = MutationLock::for_path(Path::new("/tmp/shellmark-lock-test/a"));
        let b = MutationLock::for_path(Path::new("/tmp/shellmark-lock-test/b"));
        assert!(!Arc::ptr_eq(&a.inner, &b.inner));
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let lock = MutationLock::for_path(Path::new("relative-bookmarks"));
        assert!(lock.path().is_absolute());
    }

    #[test]
    fn test_with_lock_returns_value() {
        let value = with_lock(Path::new("/tmp/shellmark-lock-test/value"), || 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_critical_sections_do_not_overlap() {
        let path = PathBuf::from("/tmp/shellmark-lock-test/concurrent");
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let path = path.clone();
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    with_lock(&path, || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lock_survives_panicking_holder() {
        let path = PathBuf::from("/tmp/shellmark-lock-test/panic");
        let panicking = path.clone();
        let result = thread::spawn(move || {
            with_lock(&panicking, || panic!("holder failed"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(with_lock(&path, || "recovered"), "recovered");
    }
}
