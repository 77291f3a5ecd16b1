//! SHA-256 digests for cache keys and integrity verification.
//!
//! Font assets are small, so digests run over in-memory buffers rather
//! than streaming from disk.

use sha2::{Digest, Sha256};

/// Compute SHA-256 of a byte buffer and return the digest as lowercase hex.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// True when the digest of `bytes` equals `expected` exactly.
///
/// Plain string comparison, no case normalization: an uppercase hex digest
/// does not match. Callers supply lowercase hex.
pub fn verify(bytes: &[u8], expected: &str) -> bool {
    sha256_bytes(bytes) == expected
}
