use std::fs;
use std::path::{Path, PathBuf};

use super::MemohConfig;
use crate::error::{MemohError, Result};

impl MemohConfig {
    /// Load from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(err) => return Err(err.into()),
        };
        toml::from_str(&raw).map_err(|e| {
            MemohError::Configuration(format!("invalid config file {}: {e}", path.display()))
        })
    }

    /// Write as TOML, creating parent directories. The file holds the
    /// bearer token, so it is owner-only on unix.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string(self)
            .map_err(|e| MemohError::Configuration(format!("failed to serialize config: {e}")))?;
        fs::write(path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

/// `~/.memoh/config.toml`, or `.memoh/config.toml` when no home directory is known.
pub fn default_config_path() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".memoh"))
        .unwrap_or_else(|| PathBuf::from(".memoh"))
        .join("config.toml")
}
