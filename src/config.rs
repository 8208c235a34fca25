/// Application configuration
///
/// Read from `<config_dir>/folio/config.json` when it exists. Every field
/// is optional; missing ones fall back to the defaults below. The
/// `FOLIO_MEDIA_DIR` environment variable overrides the media root.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FolioError, Result};

const APP_DIR: &str = "folio";
const MEDIA_DIR_ENV: &str = "FOLIO_MEDIA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder holding `projects/`, `covers/`, `pages/` and an optional `captions.json`
    pub media_root: PathBuf,
    /// SQLite file backing the key-value store
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let media_root = dirs::picture_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("media"));

        let database_path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(APP_DIR).join("folio.db"))
            .unwrap_or_else(|| PathBuf::from("folio.db"));

        Self {
            media_root,
            database_path,
        }
    }
}

impl Config {
    /// Where the config file is looked up
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(FolioError::NoDataDir)?;
        Ok(dir.join(APP_DIR).join("config.json"))
    }

    /// Load the config file, falling back to defaults when it is missing or malformed
    pub fn load() -> Self {
        let mut config = match Self::path() {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("⚠️  Using default config ({}): {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Some(dir) = std::env::var_os(MEDIA_DIR_ENV) {
            config.media_root = PathBuf::from(dir);
        }

        config
    }

    /// Parse `path`; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.media_root.join("projects")
    }

    pub fn covers_dir(&self) -> PathBuf {
        self.media_root.join("covers")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.media_root.join("pages")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "media_root": "/srv/portfolio" }"#).unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.media_root, PathBuf::from("/srv/portfolio"));
        assert_eq!(config.database_path, Config::default().database_path);
        assert_eq!(config.covers_dir(), PathBuf::from("/srv/portfolio/covers"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ media_root").unwrap();

        assert!(matches!(Config::from_file(&path), Err(FolioError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }
}
