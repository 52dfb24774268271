use crate::core::path::{config_file, default_remote_staging_dir, default_staging_dir, ensure_dir};
use crate::core::{HelperError, HelperResult};
use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted when `editor_path` is unset.
pub const EDITOR_HOME_ENV: &str = "TRAE_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Installation root of the target editor (the directory containing `bin/`)
    ///
    /// Falls back to the `TRAE_HOME` environment variable when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_path: Option<String>,

    /// Installation root of the editor on remote hosts
    ///
    /// When unset, remote installs run relative to the remote login directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_editor_path: Option<String>,

    /// Name of the editor executable inside `<root>/bin`
    #[serde(default = "default_editor_binary")]
    pub editor_binary: String,

    /// Marketplace base URL
    #[serde(default = "default_marketplace_url")]
    pub marketplace_url: String,

    /// Local staging directory for downloaded packages
    /// (defaults to `<system temp>/vsplugin-helper`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<String>,

    /// Staging directory on remote hosts
    #[serde(default = "default_remote_staging_dir")]
    pub remote_staging_dir: String,
}

fn default_editor_binary() -> String {
    "trae".to_string()
}

fn default_marketplace_url() -> String {
    "https://marketplace.visualstudio.com".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor_path: None,
            remote_editor_path: None,
            editor_binary: default_editor_binary(),
            marketplace_url: default_marketplace_url(),
            staging_dir: None,
            remote_staging_dir: default_remote_staging_dir(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, creating a default one if missing
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\vsplugin-helper\config.yaml
    /// - Linux: ~/.config/vsplugin-helper/config.yaml
    /// - macOS: ~/Library/Application Support/vsplugin-helper/config.yaml
    pub fn load() -> HelperResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HelperError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to the platform config directory
    pub fn save(&self) -> HelperResult<()> {
        let config_path = config_file()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| HelperError::Path("Invalid config path".to_string()))?;

        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| HelperError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Editor root from config, else from `TRAE_HOME`
    pub fn resolve_editor_path(&self) -> Option<PathBuf> {
        self.editor_path
            .as_ref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var(EDITOR_HOME_ENV)
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from)
            })
    }

    /// Get the local staging directory path
    pub fn get_staging_dir(&self) -> PathBuf {
        match self.staging_dir {
            Some(ref dir) => PathBuf::from(dir),
            None => default_staging_dir(),
        }
    }
}

impl ConfigProvider for Config {
    fn editor_path(&self) -> Option<PathBuf> {
        self.resolve_editor_path()
    }

    fn remote_editor_path(&self) -> Option<&str> {
        self.remote_editor_path.as_deref()
    }

    fn editor_binary(&self) -> &str {
        &self.editor_binary
    }

    fn marketplace_url(&self) -> &str {
        &self.marketplace_url
    }

    fn staging_dir(&self) -> PathBuf {
        self.get_staging_dir()
    }

    fn remote_staging_dir(&self) -> &str {
        &self.remote_staging_dir
    }
}
