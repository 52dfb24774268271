//! Common utilities for integration tests

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use std::path::{Path, PathBuf};

pub const PAGE_PATH: &str = "/items";

/// Isolated environment for one test
pub struct TestContext {
    pub temp: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.child("config").path()).unwrap();
        Self { temp }
    }

    /// Command for running vsplugin-helper with its directories redirected
    pub fn helper(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vsplugin-helper").unwrap();
        cmd.current_dir(self.temp.path())
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.child("config").path())
            .env_remove("RUST_LOG")
            .env_remove("TRAE_HOME")
            .env_remove("VSPLUGIN_REMOTE_HOST")
            .env_remove("HTTP_PROXY")
            .env_remove("HTTPS_PROXY")
            .env_remove("http_proxy")
            .env_remove("https_proxy");
        cmd
    }

    pub fn config_file(&self) -> PathBuf {
        // dirs ignores XDG_CONFIG_HOME on macOS
        let config_dir = if cfg!(target_os = "macos") {
            self.temp.path().join("Library").join("Application Support")
        } else {
            self.temp.child("config").to_path_buf()
        };
        config_dir.join("vsplugin-helper").join("config.yaml")
    }

    pub fn write_config(&self, content: &str) {
        let path = self.config_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn log_file(&self) -> PathBuf {
        self.temp
            .child(".trae-logs")
            .child("plugin-installer.log")
            .to_path_buf()
    }

    pub fn log_contents(&self) -> String {
        std::fs::read_to_string(self.log_file()).unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

/// Write an executable shell script
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, format!("#!/bin/sh\n{}", body)).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

/// Fake editor under `<root>/bin/trae` that records its arguments and
/// working directory next to itself
#[cfg(unix)]
pub fn install_fake_editor(root: &Path, stderr: Option<&str>) {
    let mut body = String::from(
        "dir=$(dirname \"$0\")\necho \"$@\" > \"$dir/args.txt\"\npwd > \"$dir/cwd.txt\"\n",
    );
    if let Some(message) = stderr {
        body.push_str(&format!("echo '{}' >&2\n", message));
    }
    write_script(&root.join("bin").join("trae"), &body);
}
