use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::FetchOptions;

/// Global configuration loaded from `~/.config/fontvault/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Maximum families loaded concurrently by the parallel loader.
    pub max_concurrent_loads: usize,
    /// TCP connect timeout for asset fetches, in seconds.
    pub connect_timeout_secs: u64,
    /// Optional overall per-request timeout in seconds (None = no cap).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Redirect hop limit for asset fetches.
    pub max_redirects: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            max_concurrent_loads: 8,
            connect_timeout_secs: 30,
            request_timeout_secs: None,
            max_redirects: 10,
        }
    }
}

impl VaultConfig {
    /// Transport options derived from this config.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_redirects: self.max_redirects,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fontvault")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VaultConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = VaultConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: VaultConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Conventional cache directory for callers that want one:
/// `~/.cache/fontvault`.
pub fn default_cache_root() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fontvault")?;
    Ok(xdg_dirs.get_cache_home())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = VaultConfig::default();
        assert_eq!(cfg.max_concurrent_loads, 8);
        assert_eq!(cfg.connect_timeout_secs, 30);
        assert!(cfg.request_timeout_secs.is_none());
        assert_eq!(cfg.max_redirects, 10);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = VaultConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: VaultConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.max_concurrent_loads, cfg.max_concurrent_loads);
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
        assert_eq!(parsed.max_redirects, cfg.max_redirects);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            max_concurrent_loads = 2
            connect_timeout_secs = 5
            max_redirects = 3
        "#;
        let cfg: VaultConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_concurrent_loads, 2);
        assert_eq!(cfg.connect_timeout_secs, 5);
        assert!(cfg.request_timeout_secs.is_none());
        assert_eq!(cfg.max_redirects, 3);
    }

    #[test]
    fn config_toml_request_timeout() {
        let toml = r#"
            max_concurrent_loads = 4
            connect_timeout_secs = 10
            request_timeout_secs = 120
            max_redirects = 5
        "#;
        let cfg: VaultConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.request_timeout_secs, Some(120));
    }

    #[test]
    fn fetch_options_bridge() {
        let toml = r#"
            max_concurrent_loads = 4
            connect_timeout_secs = 10
            request_timeout_secs = 120
            max_redirects = 5
        "#;
        let cfg: VaultConfig = toml::from_str(toml).unwrap();
        let opts = cfg.fetch_options();
        assert_eq!(opts.connect_timeout, Duration::from_secs(10));
        assert_eq!(opts.request_timeout, Some(Duration::from_secs(120)));
        assert_eq!(opts.max_redirects, 5);
    }
}
