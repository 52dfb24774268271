use crate::core::path::{ensure_dir, remove_file_if_exists};
use crate::core::{ExtensionIdentifier, HelperResult};
use crate::di::PackageFetcher;
use crate::http::ResponseKind;
use crate::marketplace::ResolvedRelease;
use std::fs;
use std::path::{Path, PathBuf};

/// A package blob staged on local disk for one install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedPackage {
    pub local_path: PathBuf,
    pub identifier: ExtensionIdentifier,
}

impl DownloadedPackage {
    /// Delete the staged file. Safe to call more than once.
    pub fn remove(&self) -> HelperResult<bool> {
        remove_file_if_exists(&self.local_path)
    }
}

/// Where the package for `identifier` is staged inside `staging_dir`
pub fn staging_path(staging_dir: &Path, identifier: &ExtensionIdentifier) -> PathBuf {
    staging_dir.join(identifier.package_file_name())
}

/// Write package bytes to the staging directory, creating it if absent
pub fn write_package(
    staging_dir: &Path,
    identifier: &ExtensionIdentifier,
    data: &[u8],
) -> HelperResult<DownloadedPackage> {
    ensure_dir(staging_dir)?;
    let local_path = staging_path(staging_dir, identifier);
    if let Err(e) = fs::write(&local_path, data) {
        // A partial write must not outlive the failed download
        if let Err(cleanup) = remove_file_if_exists(&local_path) {
            tracing::warn!("Could not remove partial file {}: {}", local_path.display(), cleanup);
        }
        return Err(e.into());
    }

    tracing::info!("Package saved to {}", local_path.display());
    Ok(DownloadedPackage {
        local_path,
        identifier: identifier.clone(),
    })
}

/// Download a resolved release into the staging directory
pub async fn download_package(
    fetcher: &dyn PackageFetcher,
    release: &ResolvedRelease,
    staging_dir: &Path,
) -> HelperResult<DownloadedPackage> {
    tracing::info!(
        "Downloading {} {} from {}",
        release.identifier,
        release.version,
        release.package_url
    );
    let data = fetcher
        .fetch(&release.package_url, ResponseKind::Binary)
        .await?
        .into_bytes();

    write_package(staging_dir, &release.identifier, &data)
}
