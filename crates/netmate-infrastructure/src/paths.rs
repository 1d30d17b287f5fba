//! Unified path management for NetMate configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/netmate/           # Config directory (platform dependent)
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! ├── wifi_solution.csv        # Default troubleshooting catalog
//! └── logs/                    # Application logs
//!     └── netmate.log.YYYY-MM-DD
//! ```

use netmate_core::config::DEFAULT_CATALOG_FILE;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "netmate";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves NetMate's files under the platform config directory.
pub struct NetmatePaths;

impl NetmatePaths {
    /// Returns the NetMate configuration directory (e.g. `~/.config/netmate/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }

    pub fn default_catalog_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(DEFAULT_CATALOG_FILE))
    }

    /// Resolves a configured catalog path: absolute paths are kept, relative
    /// ones are joined onto `base`.
    pub fn resolve_catalog_path(configured: &Path, base: &Path) -> PathBuf {
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            base.join(configured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        if let Ok(dir) = NetmatePaths::config_dir() {
            assert!(dir.ends_with(APP_DIR));
            assert_eq!(NetmatePaths::config_file().unwrap(), dir.join("config.toml"));
            assert_eq!(NetmatePaths::secret_file().unwrap(), dir.join("secret.json"));
            assert_eq!(NetmatePaths::logs_dir().unwrap(), dir.join("logs"));
        }
    }

    #[test]
    fn test_resolve_catalog_path() {
        let base = Path::new("/etc/netmate");
        assert_eq!(
            NetmatePaths::resolve_catalog_path(Path::new("data/wifi.csv"), base),
            PathBuf::from("/etc/netmate/data/wifi.csv")
        );
        assert_eq!(
            NetmatePaths::resolve_catalog_path(Path::new("/srv/wifi.csv"), base),
            PathBuf::from("/srv/wifi.csv")
        );
    }
}
