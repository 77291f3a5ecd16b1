//! Asset resolution through an optional content-addressed cache.
//!
//! A verified cache entry short-circuits the network; otherwise the asset
//! is fetched and written through to the cache best-effort.

use std::path::PathBuf;

use crate::asset::{cache_key_for, AssetDescriptor};
use crate::cache::{self, CacheIoError};
use crate::checksum;
use crate::fetch::{self, FetchError, FetchOptions};

/// Whether resolved assets are persisted to a local cache directory.
///
/// A tagged mode instead of an optional root, so `resolve` can reject the
/// mismatched mode/hash combinations up front: enabling the cache requires
/// descriptors that pin a hash, and a pinned hash requires the cache.
#[derive(Debug, Clone)]
pub enum CacheMode {
    /// Every resolve goes to the network.
    Disabled,
    /// Entries are read from and written to this directory.
    Enabled(PathBuf),
}

/// Resolution failure. Write-through problems are logged and suppressed,
/// never surfaced here.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Cache mode and descriptor hash presence disagree.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    /// The GET failed: transport error or non-2xx status.
    #[error("GET {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: FetchError,
    },
    /// Cache read failed with something other than "not found".
    #[error(transparent)]
    CacheIo(#[from] CacheIoError),
    /// The blocking resolve task could not be joined.
    #[error("resolve task join: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Resolves descriptors to bytes through an optional content-addressed
/// cache. Cheap to clone; carries no per-call state.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    cache: CacheMode,
    fetch: FetchOptions,
}

impl AssetResolver {
    pub fn new(cache: CacheMode) -> Self {
        Self {
            cache,
            fetch: FetchOptions::default(),
        }
    }

    /// Replaces the transport options (timeouts, redirect limit).
    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Resolves `asset` to its bytes.
    ///
    /// With the cache enabled, a verified entry returns without any network
    /// I/O; on a miss the asset is fetched and written through. A failed
    /// write-through is logged and swallowed since the fetched bytes are
    /// already in hand. Runs in the current thread; use [`resolve`] from
    /// async code.
    ///
    /// [`resolve`]: AssetResolver::resolve
    pub fn resolve_blocking(&self, asset: &AssetDescriptor) -> Result<Vec<u8>, ResolveError> {
        // Validation happens before any file or network I/O.
        let plan = match (&self.cache, asset.expected_hash.as_deref()) {
            (CacheMode::Disabled, None) => None,
            (CacheMode::Disabled, Some(_)) => {
                return Err(ResolveError::InvalidConfiguration(
                    "descriptor pins a hash but the cache is disabled",
                ))
            }
            (CacheMode::Enabled(_), None) => {
                return Err(ResolveError::InvalidConfiguration(
                    "cache is enabled but the descriptor pins no hash",
                ))
            }
            (CacheMode::Enabled(root), Some(hash)) => {
                Some((root.as_path(), cache_key_for(&asset.url, hash), hash))
            }
        };

        if let Some((root, key, hash)) = &plan {
            if let Some(bytes) = cache::read_verified(root, key, hash)? {
                return Ok(bytes);
            }
        }

        tracing::debug!("fetching {}", asset.url);
        let bytes =
            fetch::fetch_blocking(&asset.url, &self.fetch).map_err(|source| ResolveError::Network {
                url: asset.url.clone(),
                source,
            })?;

        if let Some((root, key, hash)) = &plan {
            if !checksum::verify(&bytes, hash) {
                tracing::warn!(
                    "fetched body for {} does not match pinned hash {}",
                    asset.url,
                    hash
                );
            }
            if let Err(e) = cache::write(root, key, &bytes) {
                tracing::warn!(
                    "write-through to {} failed: {}",
                    cache::entry_path(root, key).display(),
                    e
                );
            }
        }

        Ok(bytes)
    }

    /// Async facade over [`resolve_blocking`]: the blocking work (curl,
    /// file I/O) runs on the blocking pool.
    ///
    /// [`resolve_blocking`]: AssetResolver::resolve_blocking
    pub async fn resolve(&self, asset: &AssetDescriptor) -> Result<Vec<u8>, ResolveError> {
        let resolver = self.clone();
        let asset = asset.clone();
        tokio::task::spawn_blocking(move || resolver.resolve_blocking(&asset)).await?
    }
}
