use std::path::{Path, PathBuf};
use vsplugin_helper::config::{Config, EDITOR_HOME_ENV};
use vsplugin_helper::core::{HelperError, HelperResult};

pub fn set_editor_path(path: String) -> HelperResult<()> {
    let mut config = Config::load()?;
    let path_buf = apply_editor_path(&mut config, &path)?;
    config.save()?;

    println!("✓ Editor path set to: {}", path_buf.display());
    Ok(())
}

pub fn get_editor_path() -> HelperResult<()> {
    let config = Config::load()?;
    println!("{}", describe_editor_path(&config));
    Ok(())
}

/// Store `path` as the editor root, logging the change
fn apply_editor_path(config: &mut Config, path: &str) -> HelperResult<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(HelperError::Path("Editor path cannot be empty".to_string()));
    }

    let path_buf = PathBuf::from(trimmed);
    if !path_buf.exists() {
        tracing::warn!("Editor path {} does not exist yet", path_buf.display());
    } else if !path_buf.join("bin").join(&config.editor_binary).exists() {
        tracing::warn!(
            "No {} binary found in {}",
            config.editor_binary,
            path_buf.join("bin").display()
        );
    }

    let previous = config.editor_path.replace(trimmed.to_string());
    tracing::info!(
        "Editor path configuration changed: {} -> {}",
        previous.as_deref().unwrap_or("<unset>"),
        trimmed
    );

    Ok(path_buf)
}

fn describe_editor_path(config: &Config) -> String {
    let configured = config
        .editor_path
        .as_deref()
        .filter(|p| !p.trim().is_empty());

    match (configured, config.resolve_editor_path()) {
        (Some(path), _) => format!("Editor path: {}\n  (set in config)", Path::new(path).display()),
        (None, Some(path)) => format!("Editor path: {}\n  (from {})", path.display(), EDITOR_HOME_ENV),
        (None, None) => format!(
            "Editor path: not set\n  (run `vsplugin-helper config set-editor-path <PATH>` or set {})",
            EDITOR_HOME_ENV
        ),
    }
}
