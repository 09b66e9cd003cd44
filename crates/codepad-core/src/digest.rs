//! Content digests used for change detection.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `text`.
///
/// Used to tell whether the code buffer differs from what was last saved.
/// Not a security boundary.
pub fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
