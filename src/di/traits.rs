//! Trait definitions for dependency injection

use crate::core::{ExtensionIdentifier, HelperResult};
use crate::http::{FetchedBody, ResponseKind};
use crate::marketplace::ResolvedRelease;
use crate::process::ProcessOutput;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Editor installation root, already resolved against `TRAE_HOME`
    fn editor_path(&self) -> Option<PathBuf>;

    /// Editor installation root on remote hosts
    fn remote_editor_path(&self) -> Option<&str>;

    /// Executable name inside `<root>/bin`
    fn editor_binary(&self) -> &str;

    /// Marketplace base URL
    fn marketplace_url(&self) -> &str;

    /// Local staging directory
    fn staging_dir(&self) -> PathBuf;

    /// Staging directory on remote hosts
    fn remote_staging_dir(&self) -> &str;
}

/// Trait for HTTP fetching with the shared retry budget
#[async_trait]
pub trait PackageFetcher: Send + Sync {
    /// Fetch `url`, reading the body as `kind`
    async fn fetch(&self, url: &str, kind: ResponseKind) -> HelperResult<FetchedBody>;
}

/// Trait for turning an identifier into a downloadable release
#[async_trait]
pub trait ReleaseResolver: Send + Sync {
    async fn resolve(&self, identifier: &ExtensionIdentifier) -> HelperResult<ResolvedRelease>;
}

/// Trait for running local child processes
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` to completion, capturing its output
    ///
    /// `working_dir` applies to the child only.
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        working_dir: Option<&Path>,
    ) -> HelperResult<ProcessOutput>;
}

/// Trait for the remote host channel
///
/// Every operation completes before returning; callers never need to wait
/// for the remote side separately.
#[async_trait]
pub trait RemoteHost: Send + Sync {
    /// Display name of the remote (the SSH host)
    fn name(&self) -> &str;

    /// Create `dir` and its parents
    async fn ensure_dir(&self, dir: &str) -> HelperResult<()>;

    /// Write `data` to `path`, replacing any existing file
    async fn write_file(&self, path: &str, data: &[u8]) -> HelperResult<()>;

    /// Size of `path` in bytes, `None` if it does not exist
    async fn file_size(&self, path: &str) -> HelperResult<Option<u64>>;

    /// Run a shell command on the remote host
    async fn exec(&self, command: &str) -> HelperResult<ProcessOutput>;

    /// Remove `path` if present
    async fn remove_file(&self, path: &str) -> HelperResult<()>;
}
