//! Invocation of the editor's extension install command
//!
//! The install command is `<root>/bin/<binary> --install-extension <path>`,
//! with `--remote` appended for remote installs. Success is judged by the
//! captured stderr: any non-blank stderr is a failure, even with a zero exit
//! code. The staged package is removed after every attempt, whatever the
//! outcome.

use super::staging::DownloadedPackage;
use crate::core::{HelperError, HelperResult};
use crate::di::{ConfigProvider, ProcessRunner, RemoteHost};
use crate::process::ProcessOutput;
use crate::remote::{shell_quote, RemoteStagedPackage};
use std::path::{Path, PathBuf};

pub const INSTALL_FLAG: &str = "--install-extension";
pub const REMOTE_FLAG: &str = "--remote";

/// Remote `bin` directory when no remote root is configured; expanded by the remote shell.
pub const REMOTE_DEFAULT_BIN_DIR: &str = "\"${TRAE_HOME:-.}/bin\"";

/// Result of one install attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Success,
    Failure(String),
}

impl InstallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Success)
    }

    /// `Failure` becomes [`HelperError::InstallFailed`]
    pub fn into_result(self) -> HelperResult<()> {
        match self {
            InstallOutcome::Success => Ok(()),
            InstallOutcome::Failure(reason) => Err(HelperError::InstallFailed(reason)),
        }
    }
}

/// Arguments passed to the install binary
pub fn install_args(package_path: &str, remote: bool) -> Vec<String> {
    let mut args = vec![INSTALL_FLAG.to_string(), package_path.to_string()];
    if remote {
        args.push(REMOTE_FLAG.to_string());
    }
    args
}

/// Judge a finished install command
pub fn evaluate_output(output: &ProcessOutput) -> InstallOutcome {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return InstallOutcome::Failure(stderr.to_string());
    }
    match output.status {
        Some(0) => InstallOutcome::Success,
        Some(code) => InstallOutcome::Failure(format!("install command exited with code {}", code)),
        None => InstallOutcome::Failure("install command was terminated by a signal".to_string()),
    }
}

/// Editor root for a local install
///
/// Config (or `TRAE_HOME`) first; the current directory is accepted only
/// when a remote context is active.
pub fn resolve_install_root(config: &dyn ConfigProvider, remote_context: bool) -> HelperResult<PathBuf> {
    if let Some(root) = config.editor_path() {
        return Ok(root);
    }
    if remote_context {
        let cwd = std::env::current_dir()?;
        tracing::info!(
            "No editor path configured; using the working directory {} in remote context",
            cwd.display()
        );
        return Ok(cwd);
    }
    Err(HelperError::InstallPathMissing)
}

fn log_output(output: &ProcessOutput) {
    if !output.stdout.trim().is_empty() {
        tracing::info!("Install command output: {}", output.stdout.trim());
    }
    if !output.stderr.trim().is_empty() {
        tracing::warn!("Install command stderr: {}", output.stderr.trim());
    }
}

fn cleanup_local(package: &DownloadedPackage, outcome: &InstallOutcome) {
    match package.remove() {
        Ok(true) if outcome.is_success() => tracing::info!(
            "Install succeeded, removed temporary file {}",
            package.local_path.display()
        ),
        Ok(true) => tracing::info!(
            "Install failed, removed temporary file {}",
            package.local_path.display()
        ),
        Ok(false) => {}
        Err(e) => tracing::warn!(
            "Could not remove temporary file {}: {}",
            package.local_path.display(),
            e
        ),
    }
}

/// Runs the install binary on this machine
pub struct Installer<'a> {
    runner: &'a dyn ProcessRunner,
    root: PathBuf,
    binary: String,
}

impl<'a> Installer<'a> {
    pub fn new(runner: &'a dyn ProcessRunner, root: PathBuf, binary: &str) -> Self {
        Self {
            runner,
            root,
            binary: binary.to_string(),
        }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Absolute path of the install binary
    pub fn executable(&self) -> PathBuf {
        self.bin_dir().join(&self.binary)
    }

    /// Install `package`, then delete it regardless of the outcome
    pub async fn install(&self, package: DownloadedPackage, remote: bool) -> InstallOutcome {
        let outcome = self.run_install(&package.local_path, remote).await;
        cleanup_local(&package, &outcome);
        outcome
    }

    async fn run_install(&self, package_path: &Path, remote: bool) -> InstallOutcome {
        let executable = self.executable();
        let bin_dir = self.bin_dir();
        let args = install_args(&package_path.to_string_lossy(), remote);

        tracing::info!(
            "Running {} {} (in {}, {})",
            executable.display(),
            args.join(" "),
            bin_dir.display(),
            if remote { "remote" } else { "local" }
        );

        match self.runner.run(&executable, &args, Some(&bin_dir)).await {
            Ok(output) => {
                log_output(&output);
                evaluate_output(&output)
            }
            Err(e) => InstallOutcome::Failure(format!(
                "could not run {}: {}",
                executable.display(),
                e
            )),
        }
    }
}

/// Runs the install binary on a remote host
pub struct RemoteInstaller<'a> {
    host: &'a dyn RemoteHost,
    root: Option<String>,
    binary: String,
}

impl<'a> RemoteInstaller<'a> {
    /// `root` unset means the remote login directory
    pub fn new(host: &'a dyn RemoteHost, root: Option<&str>, binary: &str) -> Self {
        Self {
            host,
            root: root.map(|r| r.trim_end_matches('/').to_string()),
            binary: binary.to_string(),
        }
    }

    /// Shell command run on the remote host
    ///
    /// Without a configured root the remote `TRAE_HOME` is used, else the
    /// login directory.
    pub fn command(&self, remote_path: &str) -> String {
        let bin_dir = match self.root {
            Some(ref root) => shell_quote(&format!("{}/bin", root)),
            None => REMOTE_DEFAULT_BIN_DIR.to_string(),
        };
        let args: Vec<String> = install_args(remote_path, true)
            .iter()
            .map(|arg| shell_quote(arg))
            .collect();

        format!(
            "cd {} && ./{} {}",
            bin_dir,
            shell_quote(&self.binary),
            args.join(" ")
        )
    }

    /// Install the remote copy, then remove it and the local package
    pub async fn install(&self, staged: RemoteStagedPackage, local: DownloadedPackage) -> InstallOutcome {
        let command = self.command(&staged.remote_path);
        tracing::info!("Running on {}: {}", self.host.name(), command);

        let outcome = match self.host.exec(&command).await {
            Ok(output) => {
                log_output(&output);
                evaluate_output(&output)
            }
            Err(e) => InstallOutcome::Failure(format!("could not run install on {}: {}", self.host.name(), e)),
        };

        // Best effort; the remote copy is not verified gone
        if let Err(e) = self.host.remove_file(&staged.remote_path).await {
            tracing::warn!(
                "Could not remove {} on {}: {}",
                staged.remote_path,
                self.host.name(),
                e
            );
        }
        cleanup_local(&local, &outcome);

        outcome
    }
}
