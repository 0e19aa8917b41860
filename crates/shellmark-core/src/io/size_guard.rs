//! Size limit for bookmark files owned by another program

use crate::io::error::BookmarkError;
use std::fs;
use std::path::Path;

/// Fail if `path` is larger than `limit` bytes
///
/// Only the file metadata is consulted; the content is never opened.
pub fn check(path: &Path, limit: u64) -> Result<(), BookmarkError> {
    let actual = fs::metadata(path)
        .map_err(|e| BookmarkError::io(path, e))?
        .len();

    if actual > limit {
        return Err(BookmarkError::SizeExceeded {
            path: path.to_path_buf(),
            limit,
            actual,
        });
    }
    Ok(())
}
