use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Optional settings loaded from `~/.config/hashmv/config.toml`.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HashmvConfig {
    /// Size limit in MiB used when `--max` is not given (None = unlimited).
    pub default_max_mib: Option<i64>,
    /// Fall back to copy + rename when hold and web are on different filesystems.
    pub cross_device_copy: bool,
}

impl Default for HashmvConfig {
    fn default() -> Self {
        Self {
            default_max_mib: None,
            cross_device_copy: true,
        }
    }
}

/// Load configuration from the XDG config dirs (`~/.config/hashmv/config.toml`
/// first, then `XDG_CONFIG_DIRS`). A missing file, or an environment without
/// XDG base directories, yields defaults; nothing is written to disk.
pub fn load() -> Result<HashmvConfig> {
    let xdg_dirs = match xdg::BaseDirectories::with_prefix("hashmv") {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!("no XDG base directories ({}), using default config", e);
            return Ok(HashmvConfig::default());
        }
    };
    match xdg_dirs.find_config_file("config.toml") {
        Some(path) => load_from_path(&path),
        None => Ok(HashmvConfig::default()),
    }
}

/// Load configuration from an explicit path; a missing file yields defaults.
pub fn load_from_path(path: &Path) -> Result<HashmvConfig> {
    let data = match fs::read_to_string(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(HashmvConfig::default());
        }
        Err(e) => return Err(e).with_context(|| format!("read config: {}", path.display())),
    };
    let cfg: HashmvConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
