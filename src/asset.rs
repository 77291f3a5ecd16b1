//! Remote asset descriptors and cache-key derivation.

/// A remote font asset: its URL plus an optional SHA-256 content hash.
///
/// Immutable once built. The hash is the trust anchor for caching: without
/// it the asset is never persisted (see the resolver's cache mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    pub url: String,
    /// Expected SHA-256 of the body, lowercase hex.
    pub expected_hash: Option<String>,
}

impl AssetDescriptor {
    /// Descriptor without a content hash. Never cached.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            expected_hash: None,
        }
    }

    /// Descriptor pinned to a SHA-256 hex digest. Cacheable.
    pub fn pinned(url: &str, expected_hash: &str) -> Self {
        Self {
            url: url.to_string(),
            expected_hash: Some(expected_hash.to_string()),
        }
    }

    /// Cache key for this descriptor, `None` when it carries no hash.
    pub fn cache_key(&self) -> Option<String> {
        self.expected_hash
            .as_deref()
            .map(|hash| cache_key_for(&self.url, hash))
    }
}

/// Cache key for `url` pinned to `hash`: the hash plus the URL's file
/// extension, e.g. `abc123.ttf`.
pub fn cache_key_for(url: &str, hash: &str) -> String {
    format!("{}{}", hash, extension_from_url(url))
}

/// Extension (dot included) of the URL's last path segment.
///
/// Empty when the segment has no extension, is a bare dotfile, or the URL
/// does not parse. Query strings and fragments never leak into the result.
pub fn extension_from_url(url: &str) -> String {
    let Some(name) = last_path_segment(url) else {
        return String::new();
    };
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
