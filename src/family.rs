//! Font families: named groups of faces loaded together at most once.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

use crate::asset::AssetDescriptor;
use crate::resolver::AssetResolver;

/// Load state of a family, derived from its one-shot guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
}

/// Receives resolved font bytes. The platform font registry (UI toolkit,
/// glyph rasterizer) stays behind this seam.
pub trait FontRegistrar {
    fn register(&self, family: &str, face: &AssetDescriptor, bytes: Vec<u8>) -> Result<()>;
}

/// A named group of font faces.
///
/// `load` is idempotent: the guard is checked and set atomically, so
/// concurrent loads of the same family collapse to one. A failed load
/// resets the guard and can be retried.
#[derive(Debug)]
pub struct FontFamily {
    name: String,
    faces: Vec<AssetDescriptor>,
    loaded: AtomicBool,
}

impl FontFamily {
    pub fn new(name: &str, faces: Vec<AssetDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            faces,
            loaded: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn faces(&self) -> &[AssetDescriptor] {
        &self.faces
    }

    pub fn state(&self) -> LoadState {
        if self.loaded.load(Ordering::Acquire) {
            LoadState::Loaded
        } else {
            LoadState::Unloaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Resolves and registers every face, in declaration order.
    ///
    /// Returns `Ok(true)` when this call performed the load and `Ok(false)`
    /// when the family was already loaded (or another caller holds the
    /// guard right now). On failure the guard resets so a later call can
    /// retry; faces registered before the failure stay registered.
    pub fn load<R: FontRegistrar>(&self, resolver: &AssetResolver, registrar: &R) -> Result<bool> {
        if self
            .loaded
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::debug!("family {} already loaded, skipping", self.name);
            return Ok(false);
        }

        for face in &self.faces {
            let bytes = match resolver.resolve_blocking(face) {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.loaded.store(false, Ordering::Release);
                    return Err(e).with_context(|| {
                        format!("resolve face {} of family {}", face.url, self.name)
                    });
                }
            };
            if let Err(e) = registrar.register(&self.name, face, bytes) {
                self.loaded.store(false, Ordering::Release);
                return Err(e).with_context(|| {
                    format!("register face {} of family {}", face.url, self.name)
                });
            }
        }

        tracing::info!("family {} loaded ({} faces)", self.name, self.faces.len());
        Ok(true)
    }
}
