//! Content hashing for concurrent modification detection

use blake3;

/// Compute BLAKE3 hash of content for change detection
///
/// Returns a hex-encoded string for easy comparison and logging.
pub fn compute_hash(content: &[u8]) -> String {
    let hash = blake3::hash(content);
    hash.to_hex().to_string()
}
