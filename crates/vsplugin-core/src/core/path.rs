use crate::core::error::{HelperError, HelperResult};
use std::path::{Path, PathBuf};

/// Name of the dedicated staging subdirectory, locally and on remote hosts.
pub const STAGING_DIR_NAME: &str = "vsplugin-helper";

/// Log file name inside [`log_dir`].
pub const LOG_FILE_NAME: &str = "plugin-installer.log";

/// Get the vsplugin-helper config directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\vsplugin-helper
/// - Linux: ~/.config/vsplugin-helper
/// - macOS: ~/Library/Application Support/vsplugin-helper
pub fn helper_home() -> HelperResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| HelperError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("vsplugin-helper"))
}

/// Get the config file path (`<helper_home>/config.yaml`)
pub fn config_file() -> HelperResult<PathBuf> {
    Ok(helper_home()?.join("config.yaml"))
}

/// Directory holding the append-only install log (`~/.trae-logs`)
pub fn log_dir() -> HelperResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| HelperError::Path("Could not determine home directory".to_string()))?;
    Ok(home.join(".trae-logs"))
}

/// Default local staging directory (`<system temp>/vsplugin-helper`)
pub fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join(STAGING_DIR_NAME)
}

/// Default staging directory on a remote host
pub fn default_remote_staging_dir() -> String {
    format!("/tmp/{}", STAGING_DIR_NAME)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> HelperResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Delete a file if it is present. Returns whether a file was removed.
pub fn remove_file_if_exists(path: &Path) -> HelperResult<bool> {
    if path.exists() {
        std::fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}
