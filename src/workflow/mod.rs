//! Local and remote install flows
//!
//! Both flows run strictly forward: resolve, download, (transfer), install.
//! Any error before the install step ends the flow; once a package has been
//! staged it is removed on every path.

use crate::core::{ExtensionIdentifier, HelperError, HelperResult};
use crate::di::ServiceContainer;
use crate::package::installer::resolve_install_root;
use crate::package::staging::download_package;
use crate::package::{InstallOutcome, Installer, RemoteInstaller};
use crate::remote::Transporter;
use indicatif::ProgressBar;

/// Download `identifier` and install it with the local editor
///
/// When a remote context is active the install command gets `--remote` and
/// the working directory is accepted as the editor root.
pub async fn install_local(
    services: &ServiceContainer,
    identifier: &ExtensionIdentifier,
    progress: &ProgressBar,
) -> HelperResult<InstallOutcome> {
    let config = services.config();
    let remote_context = services.remote().is_some();
    tracing::info!(
        "Starting install of {} ({})",
        identifier,
        if remote_context { "remote context" } else { "local" }
    );

    let root = resolve_install_root(config, remote_context)?;
    tracing::info!("Using editor installation at {}", root.display());

    progress.set_message("Fetching extension info from the marketplace...");
    let release = services.resolver().resolve(identifier).await?;

    progress.set_message(format!("Downloading {} {}...", identifier, release.version));
    let package = download_package(services.fetcher(), &release, &config.staging_dir()).await?;

    progress.set_message(format!("Installing {}...", identifier));
    let outcome = Installer::new(services.runner(), root, config.editor_binary())
        .install(package, remote_context)
        .await;

    log_outcome(identifier, &outcome);
    Ok(outcome)
}

/// Download `identifier`, copy it to the remote host and install it there
///
/// Fails with [`HelperError::RemoteUnsupported`] before any request when no
/// remote context is active.
pub async fn install_remote(
    services: &ServiceContainer,
    identifier: &ExtensionIdentifier,
    progress: &ProgressBar,
) -> HelperResult<InstallOutcome> {
    let host = services.remote().ok_or(HelperError::RemoteUnsupported)?;
    let config = services.config();
    tracing::info!("Starting remote install of {} on {}", identifier, host.name());

    progress.set_message("Fetching extension info from the marketplace...");
    let release = services.resolver().resolve(identifier).await?;

    progress.set_message(format!("Downloading {} {}...", identifier, release.version));
    let package = download_package(services.fetcher(), &release, &config.staging_dir()).await?;

    progress.set_message(format!("Transferring {} to {}...", identifier, host.name()));
    let remote_dir = config.remote_staging_dir();
    let staged = match Transporter::new(host).stage(&package, remote_dir).await {
        Ok(staged) => staged,
        Err(e) => {
            let remote_path = Transporter::remote_path(&package, remote_dir);
            if let Err(cleanup) = host.remove_file(&remote_path).await {
                tracing::warn!("Could not remove {} on {}: {}", remote_path, host.name(), cleanup);
            }
            match package.remove() {
                Ok(true) => tracing::info!(
                    "Transfer failed, removed temporary file {}",
                    package.local_path.display()
                ),
                Ok(false) => {}
                Err(cleanup) => tracing::warn!(
                    "Could not remove temporary file {}: {}",
                    package.local_path.display(),
                    cleanup
                ),
            }
            return Err(e);
        }
    };

    progress.set_message(format!("Installing {} on {}...", identifier, host.name()));
    let outcome = RemoteInstaller::new(host, config.remote_editor_path(), config.editor_binary())
        .install(staged, package)
        .await;

    log_outcome(identifier, &outcome);
    Ok(outcome)
}

fn log_outcome(identifier: &ExtensionIdentifier, outcome: &InstallOutcome) {
    match outcome {
        InstallOutcome::Success => tracing::info!("Extension {} installed", identifier),
        InstallOutcome::Failure(reason) => {
            tracing::error!("Install of {} failed: {}", identifier, reason)
        }
    }
}
