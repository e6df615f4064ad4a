//! Playground configuration
//!
//! Settings are persisted with `confy` in the OS-specific config directory.

use crate::constant::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::diff::DiffOptions;
use crate::render::RendererClasses;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Directory the export dialog opens in: the last export location,
    /// else the application data directory
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.settings.export_dir {
            return dir.clone();
        }
        if let Some(proj_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from(".")
        }
    }

    /// Remember the directory of an exported file
    pub fn remember_export(&mut self, exported: &Path) {
        if let Some(parent) = exported.parent() {
            self.settings.export_dir = Some(parent.to_path_buf());
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Last directory an export was written to
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Options the playground starts with
    #[serde(default)]
    pub diff: DiffOptions,

    /// Classes used in exported HTML pages
    #[serde(default)]
    pub classes: RendererClasses,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fill_missing_fields() {
        let settings: Settings =
            serde_json::from_str(r#"{"diff":{"timeout":0.0},"classes":{"insert":"ins"}}"#).unwrap();
        assert_eq!(settings.diff.timeout, 0.0);
        assert_eq!(settings.diff.cleanup_efficiency, 4);
        assert_eq!(settings.classes.insert.as_deref(), Some("ins"));
        assert_eq!(settings.export_dir, None);
    }

    #[test]
    fn remembers_export_directory() {
        let mut config = Config {
            settings: Settings::default(),
        };
        config.remember_export(Path::new("/tmp/out/diff.html"));
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/out"));
    }
}
