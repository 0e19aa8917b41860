//! File I/O for shell-owned bookmark files
//!
//! The bookmark files belong to the desktop shell and are rewritten by it at
//! any time. This module provides the generic half of a safe mutation:
//!
//! - **Size guard**: refuse files above a bounded size before reading them
//! - **Atomic persistence**: sibling temp file + rename, copy fallback across devices
//! - **Mutation lock**: one in-flight add/remove per file within the process
//! - **Change detection**: BLAKE3 digests to notice concurrent writers
//!
//! Format knowledge lives in [`crate::codec`]; this module never parses content.

pub mod atomic;
pub mod error;
pub mod hash;
pub mod lock;
pub mod size_guard;

// Re-export primary API
pub use atomic::persist;
pub use error::BookmarkError;
pub use lock::{with_lock, MutationLock};
