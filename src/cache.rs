//! Flat-directory blob store keyed by content hash.
//!
//! One file per entry at `{root}/{key}`, no index or manifest. A missing
//! entry is a miss, not an error, and a hash mismatch on read degrades to
//! a miss so the caller re-fetches.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::checksum;

/// Filesystem failure on the cache read path, anything but "not found".
#[derive(Debug, thiserror::Error)]
#[error("cache read {}: {}", .path.display(), .source)]
pub struct CacheIoError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Path of the entry for `key` under `root`.
pub fn entry_path(root: &Path, key: &str) -> PathBuf {
    root.join(key)
}

/// Read the entry for `key`. `Ok(None)` when the file does not exist;
/// other I/O failures propagate.
pub fn read(root: &Path, key: &str) -> Result<Option<Vec<u8>>, CacheIoError> {
    let path = entry_path(root, key);
    match fs::read(&path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CacheIoError { path, source: e }),
    }
}

/// Read the entry for `key` and verify it against `expected_hash`.
///
/// A mismatch (corrupted or tampered entry) is reported as a miss so the
/// caller re-fetches; the stale file stays in place until a successful
/// write-through replaces it.
pub fn read_verified(
    root: &Path,
    key: &str,
    expected_hash: &str,
) -> Result<Option<Vec<u8>>, CacheIoError> {
    let Some(bytes) = read(root, key)? else {
        return Ok(None);
    };
    if !checksum::verify(&bytes, expected_hash) {
        tracing::warn!(
            "cache entry {} failed hash verification, treating as miss",
            entry_path(root, key).display()
        );
        return Ok(None);
    }
    tracing::debug!("cache hit for {}", key);
    Ok(Some(bytes))
}

/// Write `bytes` as the entry for `key`, creating `root` if needed.
///
/// Overwrites an existing entry. The file handle is scoped to this call
/// and closed on every exit path. No temp file or atomic rename: writers
/// of the same key race last-writer-wins, and each writer already holds
/// bytes that are correct for its own caller.
pub fn write(root: &Path, key: &str, bytes: &[u8]) -> io::Result<()> {
    fs::create_dir_all(root)?;
    let mut file = fs::File::create(entry_path(root, key))?;
    file.write_all(bytes)?;
    Ok(())
}
