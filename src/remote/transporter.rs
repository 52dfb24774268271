use crate::core::{HelperError, HelperResult};
use crate::di::RemoteHost;
use crate::package::DownloadedPackage;
use std::time::Duration;

/// Default interval between remote size checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Default number of remote size checks before giving up.
pub const DEFAULT_MAX_POLLS: u32 = 20;

/// A package copy on the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStagedPackage {
    pub remote_path: String,
}

/// Copies staged packages to a remote host
///
/// The copy is confirmed by polling the remote file size until it matches
/// the local file, rather than waiting a fixed amount of time.
pub struct Transporter<'a> {
    host: &'a dyn RemoteHost,
    poll_interval: Duration,
    max_polls: u32,
}

impl<'a> Transporter<'a> {
    pub fn new(host: &'a dyn RemoteHost) -> Self {
        Self {
            host,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }

    pub fn with_polling(mut self, poll_interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls.max(1);
        self
    }

    /// Remote path a package will be staged at inside `remote_dir`
    pub fn remote_path(package: &DownloadedPackage, remote_dir: &str) -> String {
        format!(
            "{}/{}",
            remote_dir.trim_end_matches('/'),
            package.identifier.package_file_name()
        )
    }

    /// Ensure `remote_dir` exists, write the package into it and confirm the copy
    pub async fn stage(
        &self,
        package: &DownloadedPackage,
        remote_dir: &str,
    ) -> HelperResult<RemoteStagedPackage> {
        let data = tokio::fs::read(&package.local_path).await?;
        let remote_path = Self::remote_path(package, remote_dir);

        tracing::info!("Preparing {} on {}", remote_dir, self.host.name());
        self.host
            .ensure_dir(remote_dir)
            .await
            .map_err(as_transfer_error)?;

        tracing::info!(
            "Transferring {} ({} bytes) to {}:{}",
            package.local_path.display(),
            data.len(),
            self.host.name(),
            remote_path
        );
        self.host
            .write_file(&remote_path, &data)
            .await
            .map_err(as_transfer_error)?;

        self.confirm(&remote_path, data.len() as u64).await?;

        Ok(RemoteStagedPackage { remote_path })
    }

    async fn confirm(&self, remote_path: &str, expected: u64) -> HelperResult<()> {
        let mut last_seen = None;
        for poll in 1..=self.max_polls {
            last_seen = self
                .host
                .file_size(remote_path)
                .await
                .map_err(as_transfer_error)?;
            if last_seen == Some(expected) {
                tracing::debug!("Transfer of {} confirmed after {} check(s)", remote_path, poll);
                return Ok(());
            }
            if poll < self.max_polls {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        Err(HelperError::TransferError(format!(
            "{} on {} has {} bytes, expected {}",
            remote_path,
            self.host.name(),
            last_seen.map_or_else(|| "no file".to_string(), |n| n.to_string()),
            expected
        )))
    }
}

fn as_transfer_error(error: HelperError) -> HelperError {
    match error {
        HelperError::TransferError(_) => error,
        other => HelperError::TransferError(other.to_string()),
    }
}
